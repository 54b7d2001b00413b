//! Drives the repositories and the auth client against a local stub of the
//! Firestore and Identity Toolkit REST endpoints.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use fintrack_core::budgets::{BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use fintrack_core::session::AuthProviderTrait;
use fintrack_core::testing::test_session;
use fintrack_core::transactions::{NewTransaction, TransactionRepositoryTrait, TransactionType};
use fintrack_firestore::{
    FirebaseAuthClient, FirestoreBudgetRepository, FirestoreClient, FirestoreTransactionRepository,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

const PREFIX: &str = "projects/demo/databases/(default)/documents";

#[derive(Clone, Default)]
struct Stub {
    documents: Arc<Mutex<BTreeMap<String, Value>>>,
    next_id: Arc<Mutex<u32>>,
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": {"code": 404, "message": "No document to update", "status": "NOT_FOUND"}})),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer token-"))
}

async fn run_query(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": {"message": "unauthenticated"}})));
    }
    let query = &body["structuredQuery"];
    let collection = query["from"][0]["collectionId"].as_str().unwrap_or_default();
    let owner = &query["where"]["fieldFilter"]["value"];
    let prefix = format!("{}/{}/", PREFIX, collection);

    let rows: Vec<Value> = stub
        .documents
        .lock()
        .unwrap()
        .iter()
        .filter(|(name, doc)| name.starts_with(&prefix) && doc["fields"]["userId"] == *owner)
        .map(|(_, doc)| json!({"document": doc, "readTime": "2024-01-01T00:00:00Z"}))
        .collect();
    (StatusCode::OK, Json(Value::Array(rows)))
}

async fn create(
    State(stub): State<Stub>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let id = {
        let mut next = stub.next_id.lock().unwrap();
        *next += 1;
        format!("gen{}", next)
    };
    let name = format!("{}/{}/{}", PREFIX, collection, id);
    let document = json!({"name": name, "fields": body["fields"]});
    stub.documents.lock().unwrap().insert(name, document.clone());
    (StatusCode::OK, Json(document))
}

async fn fetch(
    State(stub): State<Stub>,
    Path((collection, id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let name = format!("{}/{}/{}", PREFIX, collection, id);
    match stub.documents.lock().unwrap().get(&name) {
        Some(doc) => (StatusCode::OK, Json(doc.clone())),
        None => not_found(),
    }
}

async fn patch(
    State(stub): State<Stub>,
    Path((collection, id)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let name = format!("{}/{}/{}", PREFIX, collection, id);
    let mask: Vec<&str> = params
        .iter()
        .filter(|(k, _)| k == "updateMask.fieldPaths")
        .map(|(_, v)| v.as_str())
        .collect();

    let mut documents = stub.documents.lock().unwrap();
    let updated = match documents.get(&name) {
        Some(existing) if !mask.is_empty() => {
            let mut doc = existing.clone();
            for field in mask {
                doc["fields"][field] = body["fields"][field].clone();
            }
            doc
        }
        None if !mask.is_empty() => return not_found(),
        _ => json!({"name": name, "fields": body["fields"]}),
    };
    documents.insert(name, updated.clone());
    (StatusCode::OK, Json(updated))
}

async fn remove(
    State(stub): State<Stub>,
    Path((collection, id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    let name = format!("{}/{}/{}", PREFIX, collection, id);
    match stub.documents.lock().unwrap().remove(&name) {
        Some(_) => (StatusCode::OK, Json(json!({}))),
        None => not_found(),
    }
}

async fn sign_in(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "localId": "u1",
                "email": body["email"],
                "displayName": "Ann",
                "idToken": "token-u1",
                "expiresIn": "3600"
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"code": 400, "message": "INVALID_LOGIN_CREDENTIALS"}})),
        )
    }
}

async fn spawn_stub() -> (String, Stub) {
    let stub = Stub::default();
    let documents = format!("/v1/{}", PREFIX);
    let app = Router::new()
        .route(&format!("{}:runQuery", documents), post(run_query))
        .route(&format!("{}/{{collection}}", documents), post(create))
        .route(
            &format!("{}/{{collection}}/{{id}}", documents),
            get(fetch).patch(patch).delete(remove),
        )
        .route("/v1/accounts:signInWithPassword", post(sign_in))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/v1", addr), stub)
}

fn client(base_url: &str) -> Arc<FirestoreClient> {
    Arc::new(FirestoreClient::new(base_url, "demo", None).unwrap())
}

#[tokio::test]
async fn transactions_round_trip_through_rest() {
    let (base_url, stub) = spawn_stub().await;
    let repository = FirestoreTransactionRepository::new(client(&base_url));
    let session = test_session("u1");

    let created = repository
        .insert_transaction(
            &session,
            &NewTransaction {
                transaction_type: TransactionType::Expense,
                category: "Food".to_string(),
                amount: dec!(42.5),
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                note: None,
                receipt_url: None,
            },
            chrono::Utc::now(),
        )
        .await
        .unwrap();
    assert_eq!(created.user_id, "u1");
    assert_eq!(created.amount, dec!(42.5));

    // A document written by hand without an amount
    stub.documents.lock().unwrap().insert(
        format!("{}/transactions/broken", PREFIX),
        json!({
            "name": format!("{}/transactions/broken", PREFIX),
            "fields": {
                "userId": {"stringValue": "u1"},
                "type": {"stringValue": "expense"},
                "category": {"stringValue": "Food"},
                "date": {"timestampValue": "2024-01-04T00:00:00Z"}
            }
        }),
    );

    let listed = repository.list_transactions(&session).await.unwrap();
    assert_eq!(listed.records.len(), 1);
    assert_eq!(listed.malformed.len(), 1);
    assert_eq!(listed.malformed[0].id, "broken");
    assert_eq!(listed.malformed[0].field.as_deref(), Some("amount"));

    // Someone else's session cannot see or delete the record
    let other = test_session("u2");
    assert!(repository.list_transactions(&other).await.unwrap().records.is_empty());
    let err = repository
        .delete_transaction(&other, &created.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    repository.delete_transaction(&session, &created.id).await.unwrap();
    let err = repository
        .get_transaction(&session, &created.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn budget_update_only_touches_masked_fields() {
    let (base_url, _stub) = spawn_stub().await;
    let repository = FirestoreBudgetRepository::new(client(&base_url));
    let session = test_session("u1");

    let created = repository
        .insert_budget(
            &session,
            &NewBudget {
                category: "Food".to_string(),
                amount: dec!(1000),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            },
            chrono::Utc::now(),
        )
        .await
        .unwrap();

    let updated = repository
        .update_budget(
            &session,
            &created.id,
            &BudgetUpdate {
                amount: Some(dec!(1500)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.amount, dec!(1500));
    assert_eq!(updated.category, "Food");
    assert_eq!(updated.start_date, created.start_date);
}

#[tokio::test]
async fn rejected_token_is_unauthorized() {
    let (base_url, _stub) = spawn_stub().await;
    let repository = FirestoreBudgetRepository::new(client(&base_url));
    let mut session = test_session("u1");
    session.id_token = "expired".to_string();

    let err = repository.list_budgets(&session).await.unwrap_err();
    assert!(matches!(
        err,
        fintrack_core::Error::Store(fintrack_core::errors::StoreError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn sign_in_maps_provider_errors() {
    let (base_url, _stub) = spawn_stub().await;
    let auth = FirebaseAuthClient::new(&base_url, "key", std::time::Duration::from_secs(5)).unwrap();

    let user = auth.sign_in("ann@example.com", "secret").await.unwrap();
    assert_eq!(user.user_id, "u1");
    assert_eq!(user.display_name.as_deref(), Some("Ann"));

    let err = auth.sign_in("ann@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, fintrack_core::Error::Auth(ref m) if m == "INVALID_LOGIN_CREDENTIALS"));
}
