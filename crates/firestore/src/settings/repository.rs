use std::sync::Arc;

use async_trait::async_trait;
use fintrack_core::constants::collections::USERS;
use fintrack_core::settings::{SettingsRepositoryTrait, UserSettings};
use fintrack_core::{Result, Session};

use super::model::{settings_fields, settings_from_document};
use crate::client::FirestoreClient;

/// Settings live in the user document `users/{userId}`.
pub struct FirestoreSettingsRepository {
    client: Arc<FirestoreClient>,
}

impl FirestoreSettingsRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for FirestoreSettingsRepository {
    async fn get_settings(&self, session: &Session) -> Result<Option<UserSettings>> {
        match self
            .client
            .get_document(session, USERS, &session.user_id)
            .await
        {
            Ok(document) => Ok(Some(settings_from_document(&document)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save_settings(&self, session: &Session, settings: &UserSettings) -> Result<()> {
        self.client
            .patch_document(
                session,
                USERS,
                &session.user_id,
                &settings_fields(&session.user_id, settings),
                None,
            )
            .await
            .map(|_| ())
    }
}
