use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::categories::{category_usage, Category, CategoryUpdate, CategoryUsage, NewCategory};
use crate::errors::{Result, ValidationError};
use crate::records::Fetched;
use crate::session::Session;
use crate::transactions::{TransactionRepositoryTrait, TransactionType};

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl CategoryService {
    pub fn new(
        repository: Arc<dyn CategoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn list_categories(
        &self,
        session: &Session,
        category_type: Option<TransactionType>,
    ) -> Result<Fetched<Category>> {
        let fetched = self.repository.list_categories(session).await?;
        Ok(fetched.map_records(|records| {
            records
                .into_iter()
                .filter(|c| category_type.map_or(true, |kind| c.category_type == kind))
                .collect()
        }))
    }

    async fn create_category(
        &self,
        session: &Session,
        new_category: NewCategory,
    ) -> Result<Category> {
        new_category.validate()?;
        let created = self.repository.insert_category(session, &new_category).await?;
        debug!("Created category {} ({})", created.name, created.id);
        Ok(created)
    }

    async fn update_category(
        &self,
        session: &Session,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        if update == CategoryUpdate::default() {
            return Err(
                ValidationError::InvalidInput("No category fields to update".to_string()).into(),
            );
        }
        update.validate()?;
        self.repository.update_category(session, id, &update).await
    }

    async fn delete_category(&self, session: &Session, id: &str) -> Result<()> {
        self.repository.delete_category(session, id).await
    }

    async fn category_usage(
        &self,
        session: &Session,
        category_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryUsage>> {
        let (categories, transactions) = futures::try_join!(
            self.list_categories(session, category_type),
            self.transaction_repository.list_transactions(session),
        )?;
        Ok(category_usage(&categories.records, &transactions.records))
    }
}
