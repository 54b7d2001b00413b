//! Firebase Authentication over the Identity Toolkit REST API.

use std::time::Duration;

use async_trait::async_trait;
use fintrack_core::errors::{Error, Result};
use fintrack_core::session::{AuthProviderTrait, AuthenticatedUser, Session};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::GoogleErrorResponse;

/// Public Identity Toolkit endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Lifetime assumed when the provider omits `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    /// Seconds, as a string.
    #[serde(default)]
    expires_in: Option<String>,
}

impl AccountResponse {
    fn into_user(self, fallback_email: &str) -> Result<AuthenticatedUser> {
        let id_token = self
            .id_token
            .ok_or_else(|| Error::Auth("Provider returned no ID token".to_string()))?;
        let expires_in_secs = self
            .expires_in
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        Ok(AuthenticatedUser {
            user_id: self.local_id,
            email: if self.email.is_empty() {
                fallback_email.to_string()
            } else {
                self.email
            },
            display_name: self.display_name.filter(|n| !n.is_empty()),
            id_token,
            expires_in_secs,
        })
    }
}

/// Email and password authentication against a Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseAuthClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuthClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, method: &str, body: &B) -> Result<T> {
        let url = format!("{}/accounts:{}", self.base_url, method);
        debug!("[FirebaseAuth] POST accounts:{}", method);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Auth(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Auth(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // Identity Toolkit reports failures as codes such as EMAIL_EXISTS
            let message = serde_json::from_str::<GoogleErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(Error::Auth(message));
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::Auth(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AuthProviderTrait for FirebaseAuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let response: AccountResponse = self
            .post(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        response.into_user(email)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthenticatedUser> {
        let response: AccountResponse = self
            .post(
                "signUp",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let mut user = response.into_user(email)?;

        if let Some(name) = display_name.map(str::trim).filter(|n| !n.is_empty()) {
            let _: AccountResponse = self
                .post(
                    "update",
                    &UpdateProfileRequest {
                        id_token: &user.id_token,
                        display_name: name,
                        return_secure_token: false,
                    },
                )
                .await?;
            user.display_name = Some(name.to_string());
        }
        Ok(user)
    }

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<()> {
        let _: AccountResponse = self
            .post(
                "update",
                &UpdateProfileRequest {
                    id_token: &session.id_token,
                    display_name,
                    return_secure_token: false,
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_response_to_user() {
        let response: AccountResponse = serde_json::from_str(
            r#"{"kind":"identitytoolkit#VerifyPasswordResponse","localId":"abc","email":"ann@example.com",
                "displayName":"","idToken":"tok","registered":true,"refreshToken":"r","expiresIn":"1800"}"#,
        )
        .unwrap();

        let user = response.into_user("ann@example.com").unwrap();
        assert_eq!(user.user_id, "abc");
        assert_eq!(user.display_name, None);
        assert_eq!(user.expires_in_secs, 1800);
    }

    #[test]
    fn test_missing_token_is_an_auth_error() {
        let response: AccountResponse =
            serde_json::from_str(r#"{"localId":"abc","email":"a@b.c"}"#).unwrap();
        assert!(matches!(response.into_user("a@b.c"), Err(Error::Auth(_))));
    }
}
