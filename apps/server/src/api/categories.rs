use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::{
    categories::{Category, CategoryUpdate, CategoryUsage, NewCategory},
    transactions::TransactionType,
    Fetched,
};
use serde::Deserialize;

use crate::{auth::AuthContext, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct CategoryQuery {
    #[serde(rename = "type")]
    category_type: Option<TransactionType>,
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Fetched<Category>>> {
    let categories = state
        .category_service
        .list_categories(&auth.session, query.category_type)
        .await?;
    Ok(Json(categories))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(new_category): Json<NewCategory>,
) -> ApiResult<Json<Category>> {
    let category = state
        .category_service
        .create_category(&auth.session, new_category)
        .await?;
    Ok(Json(category))
}

async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(update): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    let category = state
        .category_service
        .update_category(&auth.session, &id, update)
        .await?;
    Ok(Json(category))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<StatusCode> {
    state
        .category_service
        .delete_category(&auth.session, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Transaction counts and totals per category.
async fn category_usage(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Vec<CategoryUsage>>> {
    let usage = state
        .category_service
        .category_usage(&auth.session, query.category_type)
        .await?;
    Ok(Json(usage))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/usage", get(category_usage))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
}
