use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;

use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::budgets::{
    aggregate_all_budgets, Budget, BudgetOverview, BudgetSpending, BudgetUpdate, NewBudget,
};
use crate::errors::{Result, ValidationError};
use crate::records::Fetched;
use crate::session::Session;
use crate::snapshot::{FinanceSnapshot, SnapshotLoader};

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    snapshot_loader: Arc<SnapshotLoader>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        snapshot_loader: Arc<SnapshotLoader>,
    ) -> Self {
        Self {
            repository,
            snapshot_loader,
        }
    }
}

/// Builds the budget page figures from an already loaded snapshot.
fn build_overview(snapshot: FinanceSnapshot) -> BudgetOverview {
    let aggregation = aggregate_all_budgets(&snapshot.transactions, &snapshot.budgets);

    let total_budget = snapshot
        .budgets
        .iter()
        .fold(Decimal::ZERO, |acc, b| acc.saturating_add(b.amount));
    let total_spent = snapshot
        .transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount));

    let spending_by_budget = aggregation
        .results
        .iter()
        .map(|r| BudgetSpending {
            budget_id: r.budget.id.clone(),
            category: r.budget.category.clone(),
            spent: r.usage.spent,
        })
        .collect();

    BudgetOverview {
        results: aggregation.results,
        alerts: aggregation.alerts,
        total_budget,
        total_spent,
        remaining: total_budget.saturating_sub(total_spent),
        spending_by_budget,
        malformed: snapshot.malformed,
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn list_budgets(&self, session: &Session) -> Result<Fetched<Budget>> {
        self.repository.list_budgets(session).await
    }

    async fn create_budget(&self, session: &Session, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        let created = self
            .repository
            .insert_budget(session, &new_budget, Utc::now())
            .await?;
        debug!("Created budget {} for {}", created.id, created.category);
        Ok(created)
    }

    async fn update_budget(
        &self,
        session: &Session,
        id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        if update.is_empty() {
            return Err(ValidationError::InvalidInput("No budget fields to update".to_string()).into());
        }
        update.validate()?;
        self.repository.update_budget(session, id, &update).await
    }

    async fn delete_budget(&self, session: &Session, id: &str) -> Result<()> {
        self.repository.delete_budget(session, id).await
    }

    async fn get_budget_overview(&self, session: &Session) -> Result<BudgetOverview> {
        let snapshot = self.snapshot_loader.load(session).await?;
        Ok(build_overview(snapshot))
    }
}
