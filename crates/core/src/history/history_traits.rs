use async_trait::async_trait;

use crate::errors::Result;
use crate::history::{HistoryEntry, NewHistoryEntry};
use crate::records::Fetched;
use crate::session::Session;

/// Entries are only ever appended; there is no update or delete.
#[async_trait]
pub trait HistoryRepositoryTrait: Send + Sync {
    async fn list_history(&self, session: &Session) -> Result<Fetched<HistoryEntry>>;
    async fn append(&self, session: &Session, entry: &NewHistoryEntry) -> Result<HistoryEntry>;
}

#[async_trait]
pub trait HistoryServiceTrait: Send + Sync {
    /// All entries of the user, newest first.
    async fn list_history(&self, session: &Session) -> Result<Fetched<HistoryEntry>>;
    async fn record(&self, session: &Session, action: &str) -> Result<HistoryEntry>;
}
