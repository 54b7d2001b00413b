use std::sync::Arc;

use fintrack_core::{
    budgets::{BudgetRepositoryTrait, BudgetService, BudgetServiceTrait},
    categories::{CategoryRepositoryTrait, CategoryService, CategoryServiceTrait},
    history::{HistoryRepositoryTrait, HistoryService, HistoryServiceTrait},
    reports::{ReportService, ReportServiceTrait},
    session::AuthProviderTrait,
    settings::{SettingsRepositoryTrait, SettingsService, SettingsServiceTrait},
    snapshot::SnapshotLoader,
    transactions::{TransactionRepositoryTrait, TransactionService, TransactionServiceTrait},
};
use fintrack_firestore::{
    FirebaseAuthClient, FirestoreBudgetRepository, FirestoreCategoryRepository, FirestoreClient,
    FirestoreHistoryRepository, FirestoreSettingsRepository, FirestoreTransactionRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::SessionStore, config::Config};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub history_service: Arc<dyn HistoryServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
    pub auth_provider: Arc<dyn AuthProviderTrait>,
    pub sessions: SessionStore,
}

/// Storage and identity backends the services are built on.
pub struct Backends {
    pub transactions: Arc<dyn TransactionRepositoryTrait>,
    pub budgets: Arc<dyn BudgetRepositoryTrait>,
    pub categories: Arc<dyn CategoryRepositoryTrait>,
    pub history: Arc<dyn HistoryRepositoryTrait>,
    pub settings: Arc<dyn SettingsRepositoryTrait>,
    pub auth: Arc<dyn AuthProviderTrait>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wires the services together over the given backends.
pub fn assemble_state(backends: Backends, config: &Config) -> Arc<AppState> {
    let snapshot_loader = Arc::new(SnapshotLoader::new(
        backends.transactions.clone(),
        backends.budgets.clone(),
        config.fetch_timeout,
    ));

    let history_service: Arc<dyn HistoryServiceTrait> =
        Arc::new(HistoryService::new(backends.history));
    let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(TransactionService::new(
        backends.transactions.clone(),
        history_service.clone(),
    ));
    let budget_service: Arc<dyn BudgetServiceTrait> = Arc::new(BudgetService::new(
        backends.budgets,
        snapshot_loader.clone(),
    ));
    let category_service: Arc<dyn CategoryServiceTrait> = Arc::new(CategoryService::new(
        backends.categories,
        backends.transactions,
    ));
    let settings_service: Arc<dyn SettingsServiceTrait> = Arc::new(SettingsService::new(
        backends.settings,
        backends.auth.clone(),
    ));
    let report_service: Arc<dyn ReportServiceTrait> =
        Arc::new(ReportService::new(snapshot_loader));

    Arc::new(AppState {
        transaction_service,
        budget_service,
        category_service,
        history_service,
        settings_service,
        report_service,
        auth_provider: backends.auth,
        sessions: SessionStore::new(),
    })
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let firebase = &config.firebase;
    tracing::info!(
        "Using Firestore project {} at {}",
        firebase.project_id,
        firebase.firestore_url
    );

    let client = Arc::new(FirestoreClient::new(
        &firebase.firestore_url,
        &firebase.project_id,
        Some(config.request_timeout),
    )?);
    let auth = Arc::new(FirebaseAuthClient::new(
        &firebase.auth_url,
        &firebase.api_key,
        config.request_timeout,
    )?);

    let backends = Backends {
        transactions: Arc::new(FirestoreTransactionRepository::new(client.clone())),
        budgets: Arc::new(FirestoreBudgetRepository::new(client.clone())),
        categories: Arc::new(FirestoreCategoryRepository::new(client.clone())),
        history: Arc::new(FirestoreHistoryRepository::new(client.clone())),
        settings: Arc::new(FirestoreSettingsRepository::new(client)),
        auth,
    };

    Ok(assemble_state(backends, config))
}
