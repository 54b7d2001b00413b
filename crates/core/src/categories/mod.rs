//! Categories module - user-defined labels for transactions.

mod categories_model;
mod categories_service;
mod categories_traits;
mod category_icons;

pub use categories_model::{
    category_usage, is_hex_color, Category, CategoryUpdate, CategoryUsage, NewCategory,
    DEFAULT_CATEGORY_COLOR,
};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
pub use category_icons::CategoryIcon;
