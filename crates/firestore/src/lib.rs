//! Fintrack Firestore - data access over the Firestore and Firebase Auth REST APIs.
//!
//! Documents are parsed into the typed entities of `fintrack_core` as they are
//! read. A document that lacks a required field is reported as malformed and
//! left out instead of failing the whole read.

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod client;
pub mod document;
pub mod errors;
pub mod history;
pub mod settings;
pub mod transactions;

pub use auth::{FirebaseAuthClient, DEFAULT_AUTH_URL};
pub use budgets::FirestoreBudgetRepository;
pub use categories::FirestoreCategoryRepository;
pub use client::{FirestoreClient, DEFAULT_FIRESTORE_URL};
pub use errors::FirestoreError;
pub use history::FirestoreHistoryRepository;
pub use settings::FirestoreSettingsRepository;
pub use transactions::FirestoreTransactionRepository;
