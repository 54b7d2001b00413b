use std::sync::Arc;

use async_trait::async_trait;
use fintrack_core::categories::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use fintrack_core::constants::collections::CATEGORIES;
use fintrack_core::records::Fetched;
use fintrack_core::{Result, Session};
use log::warn;

use super::model::{category_from_document, category_update_fields, new_category_fields};
use crate::client::FirestoreClient;

pub struct FirestoreCategoryRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreCategoryRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for FirestoreCategoryRepository {
    async fn list_categories(&self, session: &Session) -> Result<Fetched<Category>> {
        let documents = self.client.list_owned(session, CATEGORIES).await?;
        let fetched: Fetched<Category> = documents.iter().map(category_from_document).collect();
        for record in &fetched.malformed {
            warn!("Skipping malformed category {}", record);
        }
        Ok(fetched)
    }

    async fn insert_category(
        &self,
        session: &Session,
        new_category: &NewCategory,
    ) -> Result<Category> {
        let document = self
            .client
            .create_owned(session, CATEGORIES, new_category_fields(new_category))
            .await?;
        Ok(category_from_document(&document)?)
    }

    async fn update_category(
        &self,
        session: &Session,
        id: &str,
        update: &CategoryUpdate,
    ) -> Result<Category> {
        let (fields, mask) = category_update_fields(update);
        let document = self
            .client
            .update_owned(session, CATEGORIES, id, &fields, &mask)
            .await?;
        Ok(category_from_document(&document)?)
    }

    async fn delete_category(&self, session: &Session, id: &str) -> Result<()> {
        self.client.delete_owned(session, CATEGORIES, id).await
    }
}
