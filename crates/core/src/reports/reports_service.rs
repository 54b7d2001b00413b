use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::constants::RECENT_TRANSACTIONS_LIMIT;
use crate::errors::Result;
use crate::reports::{dashboard_summary, period_report, DashboardSummary, PeriodReport, TimeRange};
use crate::session::Session;
use crate::snapshot::SnapshotLoader;

#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    async fn get_dashboard(&self, session: &Session) -> Result<DashboardSummary>;

    async fn get_period_report(
        &self,
        session: &Session,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<PeriodReport>;
}

pub struct ReportService {
    snapshot_loader: Arc<SnapshotLoader>,
}

impl ReportService {
    pub fn new(snapshot_loader: Arc<SnapshotLoader>) -> Self {
        Self { snapshot_loader }
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn get_dashboard(&self, session: &Session) -> Result<DashboardSummary> {
        let snapshot = self.snapshot_loader.load(session).await?;
        let mut summary = dashboard_summary(
            &snapshot.transactions,
            &snapshot.budgets,
            RECENT_TRANSACTIONS_LIMIT,
        );
        summary.malformed = snapshot.malformed;
        Ok(summary)
    }

    async fn get_period_report(
        &self,
        session: &Session,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<PeriodReport> {
        // Validate the range before fetching anything.
        range.resolve(now)?;
        let snapshot = self.snapshot_loader.load(session).await?;
        period_report(&snapshot.transactions, range, now)
    }
}
