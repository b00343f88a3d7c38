//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::schedule::Periodicity;

/// Facts about habit and goal changes, emitted after successful mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A habit and its goal were created.
    HabitCreated {
        habit_id: String,
        goal_id: String,
        periodicity: Periodicity,
    },

    /// A habit (and its goals) was soft-deleted.
    HabitDeleted { habit_id: String },

    /// A goal was completed and its streak grew.
    GoalTicked {
        habit_id: String,
        goal_id: String,
        streak: i32,
        current_value: f64,
    },

    /// A goal was completed after its streak had lapsed.
    GoalRestarted {
        habit_id: String,
        goal_id: String,
        /// Streak that was lost
        lapsed_streak: i32,
        current_value: f64,
    },

    /// A goal's progress was reset to zero.
    GoalProgressReset { habit_id: String, goal_id: String },
}

impl DomainEvent {
    pub fn habit_created(habit_id: String, goal_id: String, periodicity: Periodicity) -> Self {
        Self::HabitCreated {
            habit_id,
            goal_id,
            periodicity,
        }
    }

    pub fn habit_deleted(habit_id: String) -> Self {
        Self::HabitDeleted { habit_id }
    }

    pub fn goal_ticked(habit_id: String, goal_id: String, streak: i32, current_value: f64) -> Self {
        Self::GoalTicked {
            habit_id,
            goal_id,
            streak,
            current_value,
        }
    }

    pub fn goal_restarted(
        habit_id: String,
        goal_id: String,
        lapsed_streak: i32,
        current_value: f64,
    ) -> Self {
        Self::GoalRestarted {
            habit_id,
            goal_id,
            lapsed_streak,
            current_value,
        }
    }

    pub fn goal_progress_reset(habit_id: String, goal_id: String) -> Self {
        Self::GoalProgressReset { habit_id, goal_id }
    }

    /// Goal the event refers to, if any.
    pub fn goal_id(&self) -> Option<&str> {
        match self {
            Self::HabitCreated { goal_id, .. }
            | Self::GoalTicked { goal_id, .. }
            | Self::GoalRestarted { goal_id, .. }
            | Self::GoalProgressReset { goal_id, .. } => Some(goal_id),
            Self::HabitDeleted { .. } => None,
        }
    }
}
