use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use fintrack_core::constants::DEFAULT_FETCH_TIMEOUT_MS;
use fintrack_firestore::{DEFAULT_AUTH_URL, DEFAULT_FIRESTORE_URL};

/// Where the Firebase project lives and how to reach it.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub api_key: String,
    pub firestore_url: String,
    pub auth_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub firebase: FirebaseConfig,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Deadline for loading a user's transactions and budgets together.
    pub fetch_timeout: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FT_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let project_id =
            std::env::var("FT_FIREBASE_PROJECT_ID").context("FT_FIREBASE_PROJECT_ID is not set")?;
        let api_key =
            std::env::var("FT_FIREBASE_API_KEY").context("FT_FIREBASE_API_KEY is not set")?;
        let firestore_url = url_var("FT_FIRESTORE_URL", DEFAULT_FIRESTORE_URL);
        let auth_url = url_var("FT_AUTH_URL", DEFAULT_AUTH_URL);
        let cors_allow = std::env::var("FT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = millis_var("FT_REQUEST_TIMEOUT_MS", 30_000);
        let fetch_timeout_ms = millis_var("FT_FETCH_TIMEOUT_MS", DEFAULT_FETCH_TIMEOUT_MS);
        let log_format = std::env::var("FT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            firebase: FirebaseConfig {
                project_id,
                api_key,
                firestore_url,
                auth_url,
            },
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            log_format,
        })
    }
}

fn url_var(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn millis_var(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
