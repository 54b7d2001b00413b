//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::session::Session;
use crate::settings::UserSettings;

/// Repository trait for the per-user settings document.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get the user's settings, or `None` when the document does not exist yet.
    async fn get_settings(&self, session: &Session) -> Result<Option<UserSettings>>;

    /// Create or replace the user's settings document.
    async fn save_settings(&self, session: &Session, settings: &UserSettings) -> Result<()>;
}
