use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use fintrack_core::{
    budgets::{Budget, BudgetOverview, BudgetUpdate, NewBudget},
    Fetched,
};

use crate::{auth::AuthContext, error::ApiResult, main_lib::AppState};

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Fetched<Budget>>> {
    let budgets = state.budget_service.list_budgets(&auth.session).await?;
    Ok(Json(budgets))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(new_budget): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let budget = state
        .budget_service
        .create_budget(&auth.session, new_budget)
        .await?;
    Ok(Json(budget))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(update): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    let budget = state
        .budget_service
        .update_budget(&auth.session, &id, update)
        .await?;
    Ok(Json(budget))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&auth.session, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_budget_overview(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<BudgetOverview>> {
    let overview = state
        .budget_service
        .get_budget_overview(&auth.session)
        .await?;
    Ok(Json(overview))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/overview", get(get_budget_overview))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}
