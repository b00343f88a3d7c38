use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use habitual_core::progress::{NewProgressEntry, ProgressEntry, ProgressRepositoryTrait};
use habitual_core::Result;

use super::model::{NewProgressDB, ProgressDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::progress;

/// Inserts one entry on an open connection. Used by writer jobs that append
/// history as part of a larger transaction.
pub(crate) fn insert_entry(
    conn: &mut SqliteConnection,
    new_entry: NewProgressEntry,
) -> Result<ProgressEntry> {
    let entry_db = NewProgressDB::with_id(Uuid::new_v4().to_string(), new_entry);
    let inserted = diesel::insert_into(progress::table)
        .values(&entry_db)
        .returning(ProgressDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Ok(ProgressEntry::from(inserted))
}

/// Insertion order, used to break ties between entries sharing a timestamp.
fn insertion_order() -> diesel::expression::SqlLiteral<BigInt> {
    sql::<BigInt>("progress.rowid")
}

pub struct ProgressRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProgressRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProgressRepository { pool, writer }
    }
}

#[async_trait]
impl ProgressRepositoryTrait for ProgressRepository {
    async fn append(&self, new_entry: NewProgressEntry) -> Result<ProgressEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_entry(conn, new_entry))
            .await
    }

    fn most_recent(&self, goal_id: &str) -> Result<Option<ProgressEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let latest = progress::table
            .filter(progress::goal_id.eq(goal_id))
            .order((progress::occurred_at.desc(), insertion_order().desc()))
            .select(ProgressDB::as_select())
            .first::<ProgressDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(latest.map(ProgressEntry::from))
    }

    fn list_for_goal(&self, goal_id: &str) -> Result<Vec<ProgressEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let entries = progress::table
            .filter(progress::goal_id.eq(goal_id))
            .order((progress::occurred_at.asc(), insertion_order().asc()))
            .select(ProgressDB::as_select())
            .load::<ProgressDB>(&mut conn)
            .into_core()?;
        Ok(entries.into_iter().map(ProgressEntry::from).collect())
    }
}
