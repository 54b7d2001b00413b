use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::settings::ThemeColor;

/// A user as returned by the authentication provider after sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Token presented to the document store on behalf of the user.
    pub id_token: String,
    /// Lifetime of `id_token` in seconds.
    pub expires_in_secs: i64,
}

/// The logged-in user's context.
///
/// Created at login and dropped at logout; every service call receives it
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    #[serde(skip_serializing)]
    pub id_token: String,
    pub expires_at: DateTime<Utc>,
    pub theme_color: ThemeColor,
}

impl Session {
    pub fn from_user(user: AuthenticatedUser, now: DateTime<Utc>) -> Self {
        Self {
            expires_at: now + Duration::seconds(user.expires_in_secs),
            user_id: user.user_id,
            email: user.email,
            display_name: user.display_name,
            id_token: user.id_token,
            theme_color: ThemeColor::default(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns an error when the provider token behind this session has expired.
    pub fn ensure_active(&self, now: DateTime<Utc>) -> Result<()> {
        if self.is_expired(now) {
            return Err(Error::SessionExpired);
        }
        Ok(())
    }

    /// Name shown in greetings, falling back to the email address.
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "u1".to_string(),
            email: "ann@example.com".to_string(),
            display_name: None,
            id_token: "token".to_string(),
            expires_in_secs: 3600,
        }
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session::from_user(user(), now);

        assert!(session.ensure_active(now).is_ok());
        assert!(session.is_expired(now + Duration::seconds(3600)));
        assert!(matches!(
            session.ensure_active(now + Duration::hours(2)),
            Err(Error::SessionExpired)
        ));
    }

    #[test]
    fn test_greeting_falls_back_to_email() {
        let mut session = Session::from_user(user(), Utc::now());
        assert_eq!(session.greeting_name(), "ann@example.com");

        session.display_name = Some("Ann".to_string());
        assert_eq!(session.greeting_name(), "Ann");
    }

    #[test]
    fn test_token_is_not_serialized() {
        let session = Session::from_user(user(), Utc::now());
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("idToken").is_none());
        assert_eq!(json["themeColor"], "#4caf50");
    }
}
