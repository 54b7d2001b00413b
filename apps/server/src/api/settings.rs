use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::settings::{SettingsUpdate, UserProfile, UserSettings};
use serde::Deserialize;

use crate::{auth::AuthContext, error::ApiResult, main_lib::AppState};

async fn get_settings(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserSettings>> {
    let settings = state.settings_service.get_settings(&auth.session).await?;
    Ok(Json(settings))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Json<UserSettings>> {
    let settings = state
        .settings_service
        .update_settings(&auth.session, &update)
        .await?;
    state
        .sessions
        .set_theme_color(&auth.token, settings.theme_color);
    Ok(Json(settings))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.settings_service.get_profile(&auth.session).await?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisplayNameRequest {
    display_name: String,
}

async fn update_display_name(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<DisplayNameRequest>,
) -> ApiResult<StatusCode> {
    state
        .settings_service
        .update_display_name(&auth.session, &body.display_name)
        .await?;
    state
        .sessions
        .set_display_name(&auth.token, body.display_name.trim());
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .route("/profile", get(get_profile))
        .route("/profile/display-name", put(update_display_name))
}
