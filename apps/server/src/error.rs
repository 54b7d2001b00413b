use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fintrack_core::budgets::BudgetError;
use fintrack_core::errors::{Error as CoreError, StoreError};
use fintrack_core::transactions::TransactionError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Unauthorized(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Store(StoreError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
        CoreError::Store(StoreError::RequestFailed(_) | StoreError::Decode(_)) => {
            StatusCode::BAD_GATEWAY
        }
        CoreError::Budget(BudgetError::MalformedBudget(_))
        | CoreError::Transaction(TransactionError::MalformedTransaction(_))
        | CoreError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Budget(_) | CoreError::Transaction(_) => StatusCode::BAD_REQUEST,
        CoreError::FetchTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        CoreError::Fetch(_) => StatusCode::BAD_GATEWAY,
        CoreError::Auth(message) if message == "EMAIL_EXISTS" => StatusCode::CONFLICT,
        CoreError::Auth(_) | CoreError::SessionExpired => StatusCode::UNAUTHORIZED,
        CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => (core_status(e), e.to_string()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fetch_failures_map_to_gateway_statuses() {
        assert_eq!(
            core_status(&CoreError::FetchTimeout(Duration::from_secs(10))),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            core_status(&CoreError::Fetch("connection reset".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_store_errors_map_to_client_statuses() {
        assert_eq!(
            core_status(&StoreError::NotFound("budgets/b1".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            core_status(&StoreError::Unauthorized("token".into()).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            core_status(&CoreError::Auth("EMAIL_EXISTS".into())),
            StatusCode::CONFLICT
        );
    }
}
