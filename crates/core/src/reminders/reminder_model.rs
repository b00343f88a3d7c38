use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{Periodicity, TickReason};

/// A goal that can be ticked now, with the message to show for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReminder {
    pub goal_id: String,
    pub goal_name: String,
    pub habit_id: String,
    pub periodicity: Periodicity,
    pub reason: TickReason,
    /// Last instant the goal can be ticked without losing its streak.
    /// `None` for goals that were never ticked.
    pub deadline: Option<DateTime<Utc>>,
    pub message: String,
}
