mod model;
mod repository;

pub use model::{budget_from_document, budget_update_fields, new_budget_fields};
pub use repository::FirestoreBudgetRepository;
