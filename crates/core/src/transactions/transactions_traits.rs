use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::records::Fetched;
use crate::session::Session;
use crate::transactions::{NewTransaction, Transaction, TransactionFilter};

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// All transactions of the user, unfiltered.
    async fn list_transactions(&self, session: &Session) -> Result<Fetched<Transaction>>;

    async fn get_transaction(&self, session: &Session, id: &str) -> Result<Transaction>;

    async fn insert_transaction(
        &self,
        session: &Session,
        new_transaction: &NewTransaction,
        created_at: DateTime<Utc>,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<()>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn add_transaction(
        &self,
        session: &Session,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<Transaction>;

    /// Matching transactions, newest first.
    async fn list_transactions(
        &self,
        session: &Session,
        filter: &TransactionFilter,
    ) -> Result<Fetched<Transaction>>;

    async fn recent_transactions(&self, session: &Session, limit: usize)
        -> Result<Vec<Transaction>>;
}
