use async_trait::async_trait;

use crate::categories::{Category, CategoryUpdate, CategoryUsage, NewCategory};
use crate::errors::Result;
use crate::records::Fetched;
use crate::session::Session;
use crate::transactions::TransactionType;

#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn list_categories(&self, session: &Session) -> Result<Fetched<Category>>;
    async fn insert_category(&self, session: &Session, new_category: &NewCategory)
        -> Result<Category>;
    async fn update_category(
        &self,
        session: &Session,
        id: &str,
        update: &CategoryUpdate,
    ) -> Result<Category>;
    async fn delete_category(&self, session: &Session, id: &str) -> Result<()>;
}

#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn list_categories(
        &self,
        session: &Session,
        category_type: Option<TransactionType>,
    ) -> Result<Fetched<Category>>;
    async fn create_category(&self, session: &Session, new_category: NewCategory)
        -> Result<Category>;
    async fn update_category(
        &self,
        session: &Session,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;
    async fn delete_category(&self, session: &Session, id: &str) -> Result<()>;
    async fn category_usage(
        &self,
        session: &Session,
        category_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryUsage>>;
}
