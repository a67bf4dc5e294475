//! Entity store
//!
//! CRUD over venues, artists and shows. Every mutating operation runs in its
//! own transaction: it either commits fully or the transaction is dropped and
//! rolled back, leaving nothing behind. There is no optimistic concurrency
//! check; concurrent updates to the same record resolve as last writer wins.

mod artists;
mod shows;
mod venues;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::time::{self, Clock, SystemClock};
use crate::Result;

/// Explicit handle to the booking database
///
/// Cheap to clone; each request handler takes its own copy.
#[derive(Clone)]
pub struct Store {
    pub(crate) pool: SqlitePool,
    pub(crate) clock: Arc<dyn Clock>,
}

impl Store {
    /// Store backed by the wall clock
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub(crate) fn encode_genres(genres: &[String]) -> Result<String> {
    Ok(serde_json::to_string(genres)?)
}

pub(crate) fn decode_genres(raw: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn decode_instant(millis: i64) -> Result<DateTime<Utc>> {
    time::from_millis(millis).ok_or_else(|| {
        sqlx::Error::Decode(format!("start_time out of range: {}", millis).into()).into()
    })
}

/// True if a row with `id` exists; `sql` selects by a single `?` id parameter
pub(crate) async fn row_exists(conn: &mut SqliteConnection, sql: &str, id: i64) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar(sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}
