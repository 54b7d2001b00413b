use async_trait::async_trait;

use crate::errors::Result;
use crate::session::{AuthenticatedUser, Session};

/// Contract with the external authentication provider.
#[async_trait]
pub trait AuthProviderTrait: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthenticatedUser>;

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<()>;
}
