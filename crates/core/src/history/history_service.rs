use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use super::history_traits::{HistoryRepositoryTrait, HistoryServiceTrait};
use crate::errors::Result;
use crate::history::{HistoryEntry, NewHistoryEntry};
use crate::records::Fetched;
use crate::session::Session;

pub struct HistoryService {
    repository: Arc<dyn HistoryRepositoryTrait>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn HistoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HistoryServiceTrait for HistoryService {
    async fn list_history(&self, session: &Session) -> Result<Fetched<HistoryEntry>> {
        let fetched = self.repository.list_history(session).await?;
        Ok(fetched.map_records(|mut entries| {
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            entries
        }))
    }

    async fn record(&self, session: &Session, action: &str) -> Result<HistoryEntry> {
        debug!("Recording history for user {}: {}", session.user_id, action);
        let entry = NewHistoryEntry {
            action: action.to_string(),
            timestamp: Utc::now(),
        };
        self.repository.append(session, &entry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_session, InMemoryStore};

    #[tokio::test]
    async fn test_history_is_listed_newest_first() {
        let store = InMemoryStore::new();
        let service = HistoryService::new(store.clone());
        let session = test_session("u1");

        service.record(&session, "first").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        service.record(&session, "second").await.unwrap();

        let listed = service.list_history(&session).await.unwrap();
        let actions: Vec<_> = listed.records.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_the_user() {
        let store = InMemoryStore::new();
        let service = HistoryService::new(store.clone());

        service.record(&test_session("u1"), "mine").await.unwrap();
        service.record(&test_session("u2"), "theirs").await.unwrap();

        let listed = service.list_history(&test_session("u1")).await.unwrap();
        assert_eq!(listed.records.len(), 1);
        assert_eq!(listed.records[0].action, "mine");
    }
}
