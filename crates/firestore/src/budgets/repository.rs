use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fintrack_core::budgets::{Budget, BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use fintrack_core::constants::collections::BUDGETS;
use fintrack_core::records::Fetched;
use fintrack_core::{Result, Session};
use log::{debug, warn};

use super::model::{budget_from_document, budget_update_fields, new_budget_fields, parse_budget};
use crate::client::FirestoreClient;

pub struct FirestoreBudgetRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreBudgetRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for FirestoreBudgetRepository {
    async fn list_budgets(&self, session: &Session) -> Result<Fetched<Budget>> {
        let documents = self.client.list_owned(session, BUDGETS).await?;
        let fetched: Fetched<Budget> = documents.iter().map(parse_budget).collect();
        for record in &fetched.malformed {
            warn!("Skipping malformed budget {}", record);
        }
        debug!(
            "Read {} budgets ({} malformed) for {}",
            fetched.records.len(),
            fetched.malformed.len(),
            session.user_id
        );
        Ok(fetched)
    }

    async fn get_budget(&self, session: &Session, id: &str) -> Result<Budget> {
        let document = self.client.get_owned(session, BUDGETS, id).await?;
        Ok(budget_from_document(&document)?)
    }

    async fn insert_budget(
        &self,
        session: &Session,
        new_budget: &NewBudget,
        created_at: DateTime<Utc>,
    ) -> Result<Budget> {
        let document = self
            .client
            .create_owned(session, BUDGETS, new_budget_fields(new_budget, created_at))
            .await?;
        Ok(budget_from_document(&document)?)
    }

    async fn update_budget(
        &self,
        session: &Session,
        id: &str,
        update: &BudgetUpdate,
    ) -> Result<Budget> {
        let (fields, mask) = budget_update_fields(update);
        let document = self
            .client
            .update_owned(session, BUDGETS, id, &fields, &mask)
            .await?;
        Ok(budget_from_document(&document)?)
    }

    async fn delete_budget(&self, session: &Session, id: &str) -> Result<()> {
        self.client.delete_owned(session, BUDGETS, id).await
    }
}
