use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fintrack_core::constants::collections::TRANSACTIONS;
use fintrack_core::records::Fetched;
use fintrack_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use fintrack_core::{Result, Session};
use log::{debug, warn};

use super::model::{new_transaction_fields, parse_transaction, transaction_from_document};
use crate::client::FirestoreClient;

pub struct FirestoreTransactionRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreTransactionRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for FirestoreTransactionRepository {
    async fn list_transactions(&self, session: &Session) -> Result<Fetched<Transaction>> {
        let documents = self.client.list_owned(session, TRANSACTIONS).await?;
        let fetched: Fetched<Transaction> = documents.iter().map(parse_transaction).collect();
        for record in &fetched.malformed {
            warn!("Skipping malformed transaction {}", record);
        }
        debug!(
            "Read {} transactions ({} malformed) for {}",
            fetched.records.len(),
            fetched.malformed.len(),
            session.user_id
        );
        Ok(fetched)
    }

    async fn get_transaction(&self, session: &Session, id: &str) -> Result<Transaction> {
        let document = self.client.get_owned(session, TRANSACTIONS, id).await?;
        Ok(transaction_from_document(&document)?)
    }

    async fn insert_transaction(
        &self,
        session: &Session,
        new_transaction: &NewTransaction,
        created_at: DateTime<Utc>,
    ) -> Result<Transaction> {
        let fields = new_transaction_fields(new_transaction, created_at);
        let document = self
            .client
            .create_owned(session, TRANSACTIONS, fields)
            .await?;
        Ok(transaction_from_document(&document)?)
    }

    async fn delete_transaction(&self, session: &Session, id: &str) -> Result<()> {
        self.client.delete_owned(session, TRANSACTIONS, id).await
    }
}
