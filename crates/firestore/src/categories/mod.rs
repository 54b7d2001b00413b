mod model;
mod repository;

pub use model::{category_from_document, category_update_fields, new_category_fields};
pub use repository::FirestoreCategoryRepository;
