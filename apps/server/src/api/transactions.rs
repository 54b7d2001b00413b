use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use fintrack_core::{
    constants::RECENT_TRANSACTIONS_LIMIT,
    transactions::{NewTransaction, Transaction, TransactionFilter},
    Fetched,
};
use serde::Deserialize;

use crate::{auth::AuthContext, error::ApiResult, main_lib::AppState};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(filter): Query<TransactionFilter>,
) -> ApiResult<Json<Fetched<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_transactions(&auth.session, &filter)
        .await?;
    Ok(Json(transactions))
}

async fn add_transaction(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(new_transaction): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .add_transaction(&auth.session, new_transaction)
        .await?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<StatusCode> {
    let _ = state
        .transaction_service
        .delete_transaction(&auth.session, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

async fn recent_transactions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let limit = query.limit.unwrap_or(RECENT_TRANSACTIONS_LIMIT);
    let transactions = state
        .transaction_service
        .recent_transactions(&auth.session, limit)
        .await?;
    Ok(Json(transactions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(add_transaction),
        )
        .route("/transactions/recent", get(recent_transactions))
        .route("/transactions/{id}", delete(delete_transaction))
}
