//! Progress domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::goals::{Goal, GoalState, GoalTransition};
use crate::schedule::Periodicity;

/// Immutable record of one completion.
///
/// `goal_id` is optional because history outlives the goal it belonged to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: String,
    pub goal_id: Option<String>,
    pub current_value_snapshot: f64,
    pub distance_from_target: f64,
    pub occurred_at: DateTime<Utc>,
    pub streak_at_time: i32,
}

/// Input model for appending a progress entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProgressEntry {
    pub goal_id: String,
    pub current_value_snapshot: f64,
    pub distance_from_target: f64,
    pub occurred_at: DateTime<Utc>,
    pub streak_at_time: i32,
}

/// Lightweight view of a goal's progress used to build messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub goal_id: String,
    pub goal_name: String,
    pub periodicity: Periodicity,
    pub current_value: f64,
    pub target_value: f64,
    pub distance_from_target: f64,
    pub streak: i32,
    pub previous_streak: i32,
    /// True when this completion started a new streak after a lapse.
    pub restarted: bool,
    pub last_occurrence: Option<DateTime<Utc>>,
}

impl ProgressSnapshot {
    pub fn from_state(state: &GoalState) -> Self {
        Self {
            goal_id: state.goal.id.clone(),
            goal_name: state.goal.name.clone(),
            periodicity: state.periodicity,
            current_value: state.goal.current_value,
            target_value: state.goal.target_value,
            distance_from_target: state.goal.distance_from_target(),
            streak: state.goal.streak,
            previous_streak: state.previous_streak,
            restarted: state.transition == GoalTransition::Restarted,
            last_occurrence: state.last_entry.as_ref().map(|e| e.occurred_at),
        }
    }

    /// Snapshot of a goal at rest, as the reminder scanner sees it.
    pub fn from_goal(
        goal: &Goal,
        periodicity: Periodicity,
        last_entry: Option<&ProgressEntry>,
    ) -> Self {
        Self {
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
            periodicity,
            current_value: goal.current_value,
            target_value: goal.target_value,
            distance_from_target: goal.distance_from_target(),
            streak: goal.streak,
            previous_streak: goal.streak,
            restarted: false,
            last_occurrence: last_entry.map(|e| e.occurred_at),
        }
    }

    pub fn target_reached(&self) -> bool {
        self.distance_from_target <= 0.0
    }
}
