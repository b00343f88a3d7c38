use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use habitual_core::errors::Error;
use habitual_core::goals::{Goal, GoalProgressUpdate, GoalRepositoryTrait, GoalTick, TickRecord};
use habitual_core::progress::NewProgressEntry;
use habitual_core::Result;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::progress::insert_entry;
use crate::schema::goals;

/// Version-checked write of value and streak. Bumps the version.
fn write_progress(conn: &mut SqliteConnection, update: &GoalProgressUpdate) -> Result<Goal> {
    let live_goal = || {
        goals::table
            .find(&update.goal_id)
            .filter(goals::deleted_at.is_null())
    };

    let updated = diesel::update(live_goal().filter(goals::version.eq(update.expected_version)))
        .set((
            goals::current_value.eq(update.current_value),
            goals::streak.eq(update.streak),
            goals::last_reset_at.eq(update.last_reset_at.map(|at| at.naive_utc())),
            goals::version.eq(goals::version + 1),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;

    if updated == 0 {
        let exists = live_goal()
            .count()
            .get_result::<i64>(conn)
            .map_err(StorageError::from)?
            > 0;
        return Err(if exists {
            debug!(
                "Goal {} changed since version {}",
                update.goal_id, update.expected_version
            );
            Error::ConcurrentUpdateConflict {
                goal_id: update.goal_id.clone(),
            }
        } else {
            Error::GoalNotFound(update.goal_id.clone())
        });
    }

    let goal = live_goal()
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .map_err(StorageError::from)?;
    Ok(Goal::from(goal))
}

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .find(goal_id)
            .filter(goals::deleted_at.is_null())
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Goal::from)
            .ok_or_else(|| Error::GoalNotFound(goal_id.to_string()))
    }

    fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .filter(goals::deleted_at.is_null())
            .order(goals::created_at.asc())
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    fn list_goals_for_habit(&self, habit_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .filter(goals::habit_id.eq(habit_id))
            .filter(goals::deleted_at.is_null())
            .order(goals::created_at.asc())
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    async fn update_progress(&self, update: GoalProgressUpdate) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| write_progress(conn, &update))
            .await
    }

    async fn apply_tick(&self, tick: GoalTick) -> Result<TickRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TickRecord> {
                let goal = write_progress(conn, &tick.update)?;
                let entry = insert_entry(
                    conn,
                    NewProgressEntry {
                        goal_id: goal.id.clone(),
                        current_value_snapshot: goal.current_value,
                        distance_from_target: tick.distance_from_target,
                        occurred_at: tick.occurred_at,
                        streak_at_time: goal.streak,
                    },
                )?;
                Ok(TickRecord { goal, entry })
            })
            .await
    }
}
