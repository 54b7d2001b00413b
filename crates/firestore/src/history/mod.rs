mod model;
mod repository;

pub use model::{history_entry_from_document, history_fields};
pub use repository::FirestoreHistoryRepository;
