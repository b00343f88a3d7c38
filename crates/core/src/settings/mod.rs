//! Tracker settings persisted in the application settings store.

mod settings_model;
mod settings_traits;

pub use settings_model::*;
pub use settings_traits::SettingsRepositoryTrait;
