mod model;
mod repository;

pub use model::{settings_fields, settings_from_document};
pub use repository::FirestoreSettingsRepository;
