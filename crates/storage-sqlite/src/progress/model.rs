//! Database models for progress history.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use habitual_core::progress::{NewProgressEntry, ProgressEntry};

/// Database model for a progress entry
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::progress)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ProgressDB {
    pub id: String,
    pub goal_id: Option<String>,
    pub current_value_snapshot: f64,
    pub distance_from_target: f64,
    pub occurred_at: NaiveDateTime,
    pub streak_at_time: i32,
}

/// Database model for appending a progress entry
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::progress)]
#[serde(rename_all = "camelCase")]
pub struct NewProgressDB {
    pub id: String,
    pub goal_id: Option<String>,
    pub current_value_snapshot: f64,
    pub distance_from_target: f64,
    pub occurred_at: NaiveDateTime,
    pub streak_at_time: i32,
}

impl From<ProgressDB> for ProgressEntry {
    fn from(db: ProgressDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            current_value_snapshot: db.current_value_snapshot,
            distance_from_target: db.distance_from_target,
            occurred_at: db.occurred_at.and_utc(),
            streak_at_time: db.streak_at_time,
        }
    }
}

impl NewProgressDB {
    pub fn with_id(id: String, domain: NewProgressEntry) -> Self {
        Self {
            id,
            goal_id: Some(domain.goal_id),
            current_value_snapshot: domain.current_value_snapshot,
            distance_from_target: domain.distance_from_target,
            occurred_at: domain.occurred_at.naive_utc(),
            streak_at_time: domain.streak_at_time,
        }
    }
}
