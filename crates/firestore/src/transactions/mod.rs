mod model;
mod repository;

pub use model::{new_transaction_fields, transaction_from_document};
pub use repository::FirestoreTransactionRepository;
