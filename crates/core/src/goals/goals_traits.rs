use crate::errors::Result;
use crate::goals::goals_model::{
    CompletionOutcome, Goal, GoalProgressUpdate, GoalTick, TickRecord,
};
use crate::progress::ProgressEntry;
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Returns the goal or `Error::GoalNotFound`. Soft-deleted goals are not found.
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;

    /// All goals that are not soft-deleted.
    fn list_goals(&self) -> Result<Vec<Goal>>;

    fn list_goals_for_habit(&self, habit_id: &str) -> Result<Vec<Goal>>;

    /// Writes value and streak if the version still matches.
    ///
    /// Fails with `Error::ConcurrentUpdateConflict` on a version mismatch.
    async fn update_progress(&self, update: GoalProgressUpdate) -> Result<Goal>;

    /// Applies the progress update and appends the history entry in one transaction.
    ///
    /// Fails with `Error::ConcurrentUpdateConflict` on a version mismatch, in
    /// which case no history entry is written.
    async fn apply_tick(&self, tick: GoalTick) -> Result<TickRecord>;
}

/// Trait for the goal completion workflow.
#[async_trait]
pub trait GoalCompletionServiceTrait: Send + Sync {
    /// Records one completion of `goal_id` for `habit_id`.
    async fn complete_goal(&self, habit_id: &str, goal_id: &str) -> Result<CompletionOutcome>;

    /// Sets the goal's value and streak back to zero. History is kept.
    async fn reset_progress(&self, habit_id: &str, goal_id: &str) -> Result<Goal>;

    /// Completion history of a goal, oldest first.
    fn progress_history(&self, goal_id: &str) -> Result<Vec<ProgressEntry>>;
}
