//! Settings module - user preferences and profile.

mod settings_model;
mod settings_service;
mod settings_traits;


pub use settings_model::{Currency, SettingsUpdate, ThemeColor, UserProfile, UserSettings};
pub use settings_service::{SettingsService, SettingsServiceTrait};
pub use settings_traits::SettingsRepositoryTrait;
