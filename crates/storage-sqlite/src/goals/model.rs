//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use habitual_core::goals::{Goal, NewGoal};

use crate::habits::HabitDB;

/// Database model for goals
#[derive(
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(HabitDB, foreign_key = habit_id))]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub habit_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub current_value: f64,
    pub streak: i32,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    pub last_reset_at: Option<NaiveDateTime>,
}

/// Database model for creating a new goal
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalDB {
    pub id: String,
    pub habit_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub created_at: NaiveDateTime,
}

impl NewGoalDB {
    pub fn for_habit(
        domain: NewGoal,
        habit_id: String,
        default_id: String,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: domain.id.unwrap_or(default_id),
            habit_id,
            name: domain.name,
            description: domain.description,
            target_value: domain.target_value,
            created_at,
        }
    }
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            habit_id: db.habit_id,
            name: db.name,
            description: db.description,
            target_value: db.target_value,
            current_value: db.current_value,
            streak: db.streak,
            version: db.version,
            last_reset_at: db.last_reset_at.map(|d| d.and_utc()),
            created_at: db.created_at.and_utc(),
            deleted_at: db.deleted_at.map(|d| d.and_utc()),
        }
    }
}
