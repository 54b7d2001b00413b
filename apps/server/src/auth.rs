use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use fintrack_core::session::{AuthenticatedUser, Session};
use fintrack_core::settings::ThemeColor;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

/// Logged-in sessions keyed by the bearer token handed out at login.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new session under a fresh token, dropping expired ones first.
    pub fn insert(&self, session: Session) -> String {
        let purged = self.purge_expired(Utc::now());
        if purged > 0 {
            tracing::debug!("Purged {} expired sessions", purged);
        }
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), session);
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, session)| session)
    }

    pub fn set_theme_color(&self, token: &str, theme_color: ThemeColor) {
        if let Some(mut session) = self.sessions.get_mut(token) {
            session.theme_color = theme_color;
        }
    }

    pub fn set_display_name(&self, token: &str, display_name: &str) {
        if let Some(mut session) = self.sessions.get_mut(token) {
            session.display_name = Some(display_name.to_string());
        }
    }

    /// Removes every session expired at `now` and returns how many went.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(now));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// The caller's session, attached to the request by [`require_session`].
#[derive(Clone)]
pub struct AuthContext {
    pub token: String,
    pub session: Session,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub session: Session,
}

async fn open_session(state: &AppState, user: AuthenticatedUser) -> LoginResponse {
    let now = Utc::now();
    let mut session = Session::from_user(user, now);

    match state.settings_service.get_settings(&session).await {
        Ok(settings) => session.theme_color = settings.theme_color,
        Err(e) => tracing::warn!(
            "Could not load settings for user {}, using the default theme: {}",
            session.user_id,
            e
        ),
    }

    let expires_in = (session.expires_at - now).num_seconds();
    let access_token = state.sessions.insert(session.clone());
    tracing::info!("Opened session for user {}", session.user_id);
    LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
        session,
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .auth_provider
        .sign_in(payload.email.trim(), &payload.password)
        .await?;
    Ok(Json(open_session(&state, user).await))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let display_name = payload
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let user = state
        .auth_provider
        .sign_up(payload.email.trim(), &payload.password, display_name)
        .await?;
    Ok(Json(open_session(&state, user).await))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> StatusCode {
    state.sessions.remove(&auth.token);
    tracing::info!("Closed session for user {}", auth.session.user_id);
    StatusCode::NO_CONTENT
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return None;
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(&request)
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?
        .to_string();

    let session = state
        .sessions
        .get(&token)
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    if let Err(e) = session.ensure_active(Utc::now()) {
        state.sessions.remove(&token);
        return Err(e.into());
    }

    request
        .extensions_mut()
        .insert(AuthContext { token, session });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::testing::test_session;

    #[test]
    fn test_session_store_updates_in_place() {
        let store = SessionStore::new();
        let token = store.insert(test_session("u1"));
        assert_eq!(store.len(), 1);

        store.set_theme_color(&token, ThemeColor::Indigo);
        store.set_display_name(&token, "Ann");
        let session = store.get(&token).unwrap();
        assert_eq!(session.theme_color, ThemeColor::Indigo);
        assert_eq!(session.display_name.as_deref(), Some("Ann"));

        assert!(store.remove(&token).is_some());
        assert!(store.get(&token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_drops_expired_sessions() {
        let store = SessionStore::new();
        let mut stale = test_session("u1");
        stale.expires_at = Utc::now() - chrono::Duration::minutes(5);
        let stale_token = store.insert(stale);
        assert_eq!(store.len(), 1);

        let fresh_token = store.insert(test_session("u2"));
        assert!(store.get(&stale_token).is_none());
        assert!(store.get(&fresh_token).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_purge_expired_counts_removed() {
        let store = SessionStore::new();
        store.insert(test_session("u1"));
        store.insert(test_session("u2"));

        let later = Utc::now() + chrono::Duration::days(2);
        assert_eq!(store.purge_expired(later), 2);
        assert!(store.is_empty());
        assert_eq!(store.purge_expired(later), 0);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let request = Request::builder()
            .header(AUTHORIZATION, "bearer abc123 ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), Some("abc123"));

        let request = Request::builder()
            .header(AUTHORIZATION, "Basic abc123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), None);

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&request), None);
    }
}
