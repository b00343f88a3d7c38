use crate::errors::Result;
use crate::progress::progress_model::{NewProgressEntry, ProgressEntry};
use async_trait::async_trait;

/// Trait for the append-only progress history.
#[async_trait]
pub trait ProgressRepositoryTrait: Send + Sync {
    async fn append(&self, new_entry: NewProgressEntry) -> Result<ProgressEntry>;

    /// Latest entry for the goal by occurrence time.
    fn most_recent(&self, goal_id: &str) -> Result<Option<ProgressEntry>>;

    /// All entries for the goal, oldest first.
    fn list_for_goal(&self, goal_id: &str) -> Result<Vec<ProgressEntry>>;
}
