#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use fintrack_core::testing::{InMemoryStore, StaticAuthProvider};
use fintrack_server::{
    api::app_router,
    assemble_state,
    config::{Config, FirebaseConfig},
    Backends,
};
use serde_json::Value;
use tower::ServiceExt;

pub const EMAIL: &str = "ann@example.com";
pub const PASSWORD: &str = "hunter22";
pub const USER_ID: &str = "u1";

pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        firebase: FirebaseConfig {
            project_id: "demo".to_string(),
            api_key: "key".to_string(),
            firestore_url: "http://127.0.0.1:1/v1".to_string(),
            auth_url: "http://127.0.0.1:1/v1".to_string(),
        },
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        fetch_timeout: Duration::from_secs(2),
        log_format: "text".to_string(),
    }
}

pub fn build_test_router() -> (Router, Arc<InMemoryStore>) {
    let store = InMemoryStore::new();
    let auth = StaticAuthProvider::new().with_account(EMAIL, PASSWORD, USER_ID);
    let backends = Backends {
        transactions: store.clone(),
        budgets: store.clone(),
        categories: store.clone(),
        history: store.clone(),
        settings: store.clone(),
        auth,
    };
    let config = test_config();
    (app_router(assemble_state(backends, &config), &config), store)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({ "email": EMAIL, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["accessToken"].as_str().unwrap().to_string()
}
