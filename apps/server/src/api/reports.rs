use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use fintrack_core::reports::{DashboardSummary, PeriodReport, TimeRange};
use serde::Deserialize;

use crate::{auth::AuthContext, error::ApiResult, main_lib::AppState};

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state.report_service.get_dashboard(&auth.session).await?;
    Ok(Json(summary))
}

#[derive(Deserialize)]
struct PeriodQuery {
    range: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

async fn get_period_report(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<PeriodReport>> {
    let range = TimeRange::parse(
        query.range.as_deref().unwrap_or("this_month"),
        query.start,
        query.end,
    )?;
    let report = state
        .report_service
        .get_period_report(&auth.session, range, Utc::now())
        .await?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/dashboard", get(get_dashboard))
        .route("/reports/period", get(get_period_report))
}
