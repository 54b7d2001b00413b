use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error};

use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;
use crate::history::HistoryServiceTrait;
use crate::records::Fetched;
use crate::session::Session;
use crate::transactions::{NewTransaction, Transaction, TransactionFilter};

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    history_service: Arc<dyn HistoryServiceTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        history_service: Arc<dyn HistoryServiceTrait>,
    ) -> Self {
        Self {
            repository,
            history_service,
        }
    }

    /// The transaction change itself has already been committed, so a failed
    /// append is logged rather than returned.
    async fn record_history(&self, session: &Session, action: String) {
        if let Err(e) = self.history_service.record(session, &action).await {
            error!(
                "Failed to record history '{}' for user {}: {}",
                action, session.user_id, e
            );
        }
    }
}

fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    transactions
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn add_transaction(
        &self,
        session: &Session,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;

        let created = self
            .repository
            .insert_transaction(session, &new_transaction, Utc::now())
            .await?;
        debug!("Added transaction {} for user {}", created.id, session.user_id);

        self.record_history(
            session,
            format!(
                "Added {} transaction of {}",
                created.transaction_type, created.amount
            ),
        )
        .await;
        Ok(created)
    }

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<Transaction> {
        let existing = self.repository.get_transaction(session, id).await?;
        self.repository.delete_transaction(session, id).await?;

        self.record_history(
            session,
            format!(
                "Deleted {} transaction of {}",
                existing.transaction_type, existing.amount
            ),
        )
        .await;
        Ok(existing)
    }

    async fn list_transactions(
        &self,
        session: &Session,
        filter: &TransactionFilter,
    ) -> Result<Fetched<Transaction>> {
        let fetched = self.repository.list_transactions(session).await?;
        Ok(fetched.map_records(|records| {
            newest_first(records.into_iter().filter(|t| filter.matches(t)).collect())
        }))
    }

    async fn recent_transactions(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        let fetched = self.repository.list_transactions(session).await?;
        let mut recent = newest_first(fetched.records);
        recent.truncate(limit);
        Ok(recent)
    }
}
