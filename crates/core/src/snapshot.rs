//! Concurrent loading of a user's transactions and budgets.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::budgets::{Budget, BudgetRepositoryTrait};
use crate::errors::{Error, Result, StoreError};
use crate::records::MalformedRecord;
use crate::session::Session;
use crate::transactions::{Transaction, TransactionRepositoryTrait};

/// Everything a dashboard or budget computation needs for one user.
#[derive(Debug, Clone, Default)]
pub struct FinanceSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    /// Documents from either collection that were skipped.
    pub malformed: Vec<MalformedRecord>,
}

/// Fetches transactions and budgets side by side under one deadline.
pub struct SnapshotLoader {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    timeout: Duration,
}

impl SnapshotLoader {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        timeout: Duration,
    ) -> Self {
        Self {
            transaction_repository,
            budget_repository,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Both fetches must succeed. Exceeding the deadline yields
    /// [`Error::FetchTimeout`]; a failed remote call yields [`Error::Fetch`].
    pub async fn load(&self, session: &Session) -> Result<FinanceSnapshot> {
        let fetch = async {
            futures::try_join!(
                self.transaction_repository.list_transactions(session),
                self.budget_repository.list_budgets(session),
            )
        };

        let (transactions, budgets) = tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| {
                warn!(
                    "Snapshot fetch for user {} timed out after {:?}",
                    session.user_id, self.timeout
                );
                Error::FetchTimeout(self.timeout)
            })?
            .map_err(into_fetch_error)?;

        let mut malformed = transactions.malformed;
        malformed.extend(budgets.malformed);
        for record in &malformed {
            warn!("Skipping malformed record {}", record);
        }

        debug!(
            "Loaded {} transactions and {} budgets for user {}",
            transactions.records.len(),
            budgets.records.len(),
            session.user_id
        );

        Ok(FinanceSnapshot {
            transactions: transactions.records,
            budgets: budgets.records,
            malformed,
        })
    }
}

/// Transport failures become [`Error::Fetch`]; access errors keep their meaning.
fn into_fetch_error(err: Error) -> Error {
    match err {
        Error::Store(StoreError::RequestFailed(msg)) | Error::Store(StoreError::Decode(msg)) => {
            Error::Fetch(msg)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_session, InMemoryStore};

    #[tokio::test]
    async fn test_load_combines_both_collections() {
        let store = InMemoryStore::new();
        let session = test_session("u1");
        store.seed_expense(&session, "Food", rust_decimal_macros::dec!(10), 2024, 1, 5);
        store.seed_budget(&session, "Food", rust_decimal_macros::dec!(100), (2024, 1, 1), (2024, 1, 31));
        store.seed_malformed_budget(&session, "bad", "amount");

        let loader = SnapshotLoader::new(store.clone(), store.clone(), Duration::from_secs(1));
        let snapshot = loader.load(&session).await.unwrap();

        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.budgets.len(), 1);
        assert_eq!(snapshot.malformed.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_times_out() {
        let store = InMemoryStore::new();
        store.set_latency(Duration::from_secs(30));

        let loader = SnapshotLoader::new(store.clone(), store.clone(), Duration::from_secs(10));
        let err = loader.load(&test_session("u1")).await.unwrap_err();

        assert!(matches!(err, Error::FetchTimeout(d) if d == Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_remote_failure_is_a_fetch_error() {
        let store = InMemoryStore::new();
        store.fail_reads_with("connection reset");

        let loader = SnapshotLoader::new(store.clone(), store.clone(), Duration::from_secs(1));
        let err = loader.load(&test_session("u1")).await.unwrap_err();

        assert!(matches!(err, Error::Fetch(msg) if msg == "connection reset"));
    }
}
