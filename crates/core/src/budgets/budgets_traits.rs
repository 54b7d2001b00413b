use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::budgets::{Budget, BudgetOverview, BudgetUpdate, NewBudget};
use crate::errors::Result;
use crate::records::Fetched;
use crate::session::Session;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// All budgets of the user. Documents that fail validation are returned
    /// in `malformed` instead of failing the read.
    async fn list_budgets(&self, session: &Session) -> Result<Fetched<Budget>>;

    async fn get_budget(&self, session: &Session, id: &str) -> Result<Budget>;

    async fn insert_budget(
        &self,
        session: &Session,
        new_budget: &NewBudget,
        created_at: DateTime<Utc>,
    ) -> Result<Budget>;

    async fn update_budget(
        &self,
        session: &Session,
        id: &str,
        update: &BudgetUpdate,
    ) -> Result<Budget>;

    async fn delete_budget(&self, session: &Session, id: &str) -> Result<()>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn list_budgets(&self, session: &Session) -> Result<Fetched<Budget>>;
    async fn create_budget(&self, session: &Session, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(
        &self,
        session: &Session,
        id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;
    async fn delete_budget(&self, session: &Session, id: &str) -> Result<()>;
    async fn get_budget_overview(&self, session: &Session) -> Result<BudgetOverview>;
}
