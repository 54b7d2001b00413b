use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use fintrack_core::{history::HistoryEntry, Fetched};

use crate::{auth::AuthContext, error::ApiResult, main_lib::AppState};

async fn list_history(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Fetched<HistoryEntry>>> {
    let history = state.history_service.list_history(&auth.session).await?;
    Ok(Json(history))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/history", get(list_history))
}
