use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use habitual_core::errors::Error;
use habitual_core::goals::{Goal, NewGoal};
use habitual_core::habits::{Habit, HabitRepositoryTrait, HabitWithGoal, NewHabit};
use habitual_core::Result;

use super::model::{HabitDB, NewHabitDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::goals::{GoalDB, NewGoalDB};
use crate::schema::{goals, habits};

pub struct HabitRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HabitRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        HabitRepository { pool, writer }
    }
}

#[async_trait]
impl HabitRepositoryTrait for HabitRepository {
    fn get_habit(&self, habit_id: &str) -> Result<Habit> {
        let mut conn = get_connection(&self.pool)?;
        habits::table
            .find(habit_id)
            .filter(habits::deleted_at.is_null())
            .select(HabitDB::as_select())
            .first::<HabitDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::HabitNotFound(habit_id.to_string()))
            .and_then(Habit::try_from)
    }

    fn list_habits(&self) -> Result<Vec<Habit>> {
        let mut conn = get_connection(&self.pool)?;
        habits::table
            .filter(habits::deleted_at.is_null())
            .order(habits::created_at.asc())
            .select(HabitDB::as_select())
            .load::<HabitDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Habit::try_from)
            .collect()
    }

    async fn insert_habit_with_goal(
        &self,
        new_habit: NewHabit,
        new_goal: NewGoal,
    ) -> Result<HabitWithGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<HabitWithGoal> {
                let now = Utc::now().naive_utc();
                let habit_db = NewHabitDB {
                    id: new_habit
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_habit.name,
                    action: new_habit.action,
                    periodicity: new_habit.periodicity.as_str().to_string(),
                    created_at: now,
                };
                let habit = diesel::insert_into(habits::table)
                    .values(&habit_db)
                    .returning(HabitDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                let goal_db = NewGoalDB::for_habit(
                    new_goal,
                    habit.id.clone(),
                    Uuid::new_v4().to_string(),
                    now,
                );
                let goal = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(HabitWithGoal {
                    habit: Habit::try_from(habit)?,
                    goal: Goal::from(goal),
                })
            })
            .await
    }

    async fn soft_delete_habit(&self, habit_id: &str, deleted_at: DateTime<Utc>) -> Result<usize> {
        let habit_id = habit_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted_at = deleted_at.naive_utc();
                let habit_rows = diesel::update(
                    habits::table
                        .find(&habit_id)
                        .filter(habits::deleted_at.is_null()),
                )
                .set(habits::deleted_at.eq(deleted_at))
                .execute(conn)
                .map_err(StorageError::from)?;
                if habit_rows == 0 {
                    return Err(Error::HabitNotFound(habit_id));
                }

                let goal_rows = diesel::update(
                    goals::table
                        .filter(goals::habit_id.eq(&habit_id))
                        .filter(goals::deleted_at.is_null()),
                )
                .set(goals::deleted_at.eq(deleted_at))
                .execute(conn)
                .map_err(StorageError::from)?;

                Ok(habit_rows + goal_rows)
            })
            .await
    }
}
