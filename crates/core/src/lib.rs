//! Fintrack Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the Fintrack personal finance
//! tracker: the budget aggregation, report computations and the services
//! around them. It is storage-agnostic and defines repository traits that are
//! implemented by the `fintrack-firestore` crate.

pub mod budgets;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod history;
pub mod records;
pub mod reports;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod transactions;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use records::{Fetched, MalformedRecord};
pub use session::Session;
