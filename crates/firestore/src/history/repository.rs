use std::sync::Arc;

use async_trait::async_trait;
use fintrack_core::constants::collections::HISTORY;
use fintrack_core::history::{HistoryEntry, HistoryRepositoryTrait, NewHistoryEntry};
use fintrack_core::records::Fetched;
use fintrack_core::{Result, Session};
use log::warn;

use super::model::{history_entry_from_document, history_fields};
use crate::client::FirestoreClient;

pub struct FirestoreHistoryRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreHistoryRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HistoryRepositoryTrait for FirestoreHistoryRepository {
    async fn list_history(&self, session: &Session) -> Result<Fetched<HistoryEntry>> {
        let documents = self.client.list_owned(session, HISTORY).await?;
        let fetched: Fetched<HistoryEntry> =
            documents.iter().map(history_entry_from_document).collect();
        for record in &fetched.malformed {
            warn!("Skipping malformed history entry {}", record);
        }
        Ok(fetched)
    }

    async fn append(&self, session: &Session, entry: &NewHistoryEntry) -> Result<HistoryEntry> {
        let document = self
            .client
            .create_owned(session, HISTORY, history_fields(entry))
            .await?;
        Ok(history_entry_from_document(&document)?)
    }
}
