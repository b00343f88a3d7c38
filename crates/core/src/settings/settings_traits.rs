//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{SettingsUpdate, TrackerSettings};

/// Repository trait for tracker settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Stored settings, with defaults for anything not stored.
    fn get_settings(&self) -> Result<TrackerSettings>;

    /// Writes the fields that are set in `update`.
    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()>;
}
