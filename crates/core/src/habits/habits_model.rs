//! Habits domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::goals::{Goal, NewGoal};
use crate::schedule::Periodicity;

/// Domain model representing a recurring habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub action: String,
    pub periodicity: Periodicity,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input model for creating a habit together with its goal.
///
/// `goal_name` defaults to the habit name and `target_value` to the
/// periodicity's default target.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub id: Option<String>,
    pub name: String,
    pub action: String,
    pub periodicity: Periodicity,
    pub goal_name: Option<String>,
    pub goal_description: Option<String>,
    pub target_value: Option<f64>,
}

impl NewHabit {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.action.trim().is_empty() {
            return Err(ValidationError::MissingField("action".to_string()).into());
        }
        Ok(())
    }

    /// Goal to create alongside the habit.
    pub fn goal(&self) -> NewGoal {
        NewGoal {
            id: None,
            name: self
                .goal_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| self.name.clone()),
            description: self.goal_description.clone(),
            target_value: self
                .target_value
                .unwrap_or_else(|| self.periodicity.default_target()),
        }
    }
}

/// A habit and the goal created with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithGoal {
    pub habit: Habit,
    pub goal: Goal,
}
