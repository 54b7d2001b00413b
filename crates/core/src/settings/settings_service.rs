use super::SettingsRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::session::{AuthProviderTrait, Session};
use crate::settings::{SettingsUpdate, UserProfile, UserSettings};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Reads the user's settings, writing the defaults first if none exist.
    async fn get_settings(&self, session: &Session) -> Result<UserSettings>;

    async fn update_settings(
        &self,
        session: &Session,
        update: &SettingsUpdate,
    ) -> Result<UserSettings>;

    async fn get_profile(&self, session: &Session) -> Result<UserProfile>;

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<()>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    auth_provider: Arc<dyn AuthProviderTrait>,
}

impl SettingsService {
    pub fn new(
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
        auth_provider: Arc<dyn AuthProviderTrait>,
    ) -> Self {
        SettingsService {
            settings_repository,
            auth_provider,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    async fn get_settings(&self, session: &Session) -> Result<UserSettings> {
        if let Some(settings) = self.settings_repository.get_settings(session).await? {
            return Ok(settings);
        }

        debug!("Initializing default settings for user {}", session.user_id);
        let defaults = UserSettings::defaults_for(
            session.display_name.as_deref().unwrap_or_default(),
            &session.email,
            Utc::now(),
        );
        self.settings_repository
            .save_settings(session, &defaults)
            .await?;
        Ok(defaults)
    }

    async fn update_settings(
        &self,
        session: &Session,
        update: &SettingsUpdate,
    ) -> Result<UserSettings> {
        let mut settings = self.get_settings(session).await?;
        settings.apply(update);
        self.settings_repository
            .save_settings(session, &settings)
            .await?;
        Ok(settings)
    }

    async fn get_profile(&self, session: &Session) -> Result<UserProfile> {
        let settings = self.get_settings(session).await?;
        Ok(UserProfile {
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            display_name: session.display_name.clone(),
            member_since: settings.created_at,
        })
    }

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<()> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(ValidationError::MissingField("displayName".to_string()).into());
        }

        self.auth_provider
            .update_display_name(session, display_name)
            .await?;

        let mut settings = self.get_settings(session).await?;
        settings.name = display_name.to_string();
        self.settings_repository
            .save_settings(session, &settings)
            .await
    }
}
