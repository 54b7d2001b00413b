//! History module - append-only log of user actions.

mod history_model;
mod history_service;
mod history_traits;

pub use history_model::{HistoryEntry, NewHistoryEntry};
pub use history_service::HistoryService;
pub use history_traits::{HistoryRepositoryTrait, HistoryServiceTrait};
