//! Database models for habits.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use habitual_core::errors::Error;
use habitual_core::habits::Habit;

/// Database model for habits
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::habits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct HabitDB {
    pub id: String,
    pub name: String,
    pub action: String,
    pub periodicity: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Database model for creating a new habit
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::habits)]
#[serde(rename_all = "camelCase")]
pub struct NewHabitDB {
    pub id: String,
    pub name: String,
    pub action: String,
    pub periodicity: String,
    pub created_at: NaiveDateTime,
}

// Periodicity is stored as text, so reading it back can fail.
impl TryFrom<HabitDB> for Habit {
    type Error = Error;

    fn try_from(db: HabitDB) -> Result<Self, Self::Error> {
        Ok(Self {
            periodicity: db.periodicity.parse()?,
            id: db.id,
            name: db.name,
            action: db.action,
            created_at: db.created_at.and_utc(),
            deleted_at: db.deleted_at.map(|d| d.and_utc()),
        })
    }
}
