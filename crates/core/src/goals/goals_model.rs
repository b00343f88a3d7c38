//! Goals domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::progress::ProgressEntry;
use crate::schedule::{Periodicity, TickEvaluation};

/// Domain model representing the quantified target of a habit.
///
/// `current_value` and `streak` are only written by the completion workflow.
/// `version` is bumped on every write and used for optimistic locking.
/// `last_reset_at` marks the most recent explicit reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub habit_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub current_value: f64,
    pub streak: i32,
    pub version: i64,
    pub last_reset_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn distance_from_target(&self) -> f64 {
        self.target_value - self.current_value
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether `entry` still counts as the goal's last occurrence.
    ///
    /// History recorded up to a reset is ignored until the goal is ticked
    /// again, so a reset goal evaluates as never ticked.
    pub fn counts_since_reset(&self, entry: &ProgressEntry) -> bool {
        match self.last_reset_at {
            Some(reset_at) => self.streak != 0 || entry.occurred_at > reset_at,
            None => true,
        }
    }

    /// The history entry tick evaluation should use.
    pub fn last_counted_entry<'a>(
        &self,
        entry: Option<&'a ProgressEntry>,
    ) -> Option<&'a ProgressEntry> {
        entry.filter(|entry| self.counts_since_reset(entry))
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub target_value: f64,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if !self.target_value.is_finite() || self.target_value < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "targetValue".to_string(),
                reason: format!("{} is not a finite non-negative number", self.target_value),
            }
            .into());
        }
        Ok(())
    }
}

/// Closed set of progress fields the workflow may write.
///
/// The update only applies when the stored version still equals `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgressUpdate {
    pub goal_id: String,
    pub expected_version: i64,
    pub current_value: f64,
    pub streak: i32,
    pub last_reset_at: Option<DateTime<Utc>>,
}

/// A completion to persist: the progress update plus the history entry it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalTick {
    pub update: GoalProgressUpdate,
    pub distance_from_target: f64,
    pub occurred_at: DateTime<Utc>,
}

/// What a successfully applied tick left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct TickRecord {
    pub goal: Goal,
    pub entry: ProgressEntry,
}

/// How a goal's progress changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTransition {
    /// Completed inside the window (or for the first time); streak grew.
    Ticked,
    /// Completed after the previous streak lapsed; streak restarted at 1.
    Restarted,
    /// Progress was explicitly reset to zero.
    Reset,
}

/// Post-mutation state handed to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalState {
    pub goal: Goal,
    pub periodicity: Periodicity,
    pub transition: GoalTransition,
    /// Streak the goal had before this mutation.
    pub previous_streak: i32,
    /// Most recent history entry after the mutation.
    pub last_entry: Option<ProgressEntry>,
}

/// Result of a completion returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub goal: Goal,
    pub entry: ProgressEntry,
    pub evaluation: TickEvaluation,
    pub transition: GoalTransition,
}
