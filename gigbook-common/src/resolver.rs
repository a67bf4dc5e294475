//! Show association resolver
//!
//! Splits the shows of one venue or artist into upcoming and past relative
//! to a single observation instant. The split is recomputed on every call;
//! nothing about it is persisted.
//!
//! A show starting exactly at the observation instant is upcoming.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::warn;

use crate::store::{decode_instant, row_exists, Store};
use crate::{Error, Result};

/// Display projection of the entity on the other side of a show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowSlot {
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Shows of one venue or artist, split at the observation instant
///
/// `upcoming` is soonest first, `past` is most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    pub upcoming: Vec<ShowSlot>,
    pub past: Vec<ShowSlot>,
}

pub fn is_upcoming(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time >= now
}

impl Schedule {
    pub fn partition(slots: impl IntoIterator<Item = ShowSlot>, now: DateTime<Utc>) -> Self {
        let (mut upcoming, mut past): (Vec<_>, Vec<_>) = slots
            .into_iter()
            .partition(|slot| is_upcoming(slot.start_time, now));
        upcoming.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        past.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Self { upcoming, past }
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn total(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }
}

// Rows carry counterpart_id, counterpart_name, counterpart_image, start_time.
// A NULL name means the counterpart row is gone.
fn slots_from_rows(rows: Vec<SqliteRow>, owner: &str, owner_id: i64) -> Result<Vec<ShowSlot>> {
    let mut slots = Vec::with_capacity(rows.len());
    for row in rows {
        let show_id: i64 = row.try_get("show_id")?;
        let name: Option<String> = row.try_get("counterpart_name")?;
        let Some(name) = name else {
            warn!(
                "Skipping show {} of {} {}: counterpart no longer exists",
                show_id, owner, owner_id
            );
            continue;
        };
        slots.push(ShowSlot {
            id: row.try_get("counterpart_id")?,
            name,
            image_link: row.try_get("counterpart_image")?,
            start_time: decode_instant(row.try_get("start_time")?)?,
        });
    }
    Ok(slots)
}

impl Store {
    /// Artists booked at a venue, split into upcoming and past
    pub async fn venue_schedule(&self, venue_id: i64) -> Result<Schedule> {
        let now = self.clock.now();
        let mut conn = self.pool.acquire().await?;

        if !row_exists(&mut *conn, "SELECT id FROM venues WHERE id = ?", venue_id).await? {
            return Err(Error::not_found("venue", venue_id));
        }

        let rows = sqlx::query(
            r#"
            SELECT s.id AS show_id, s.artist_id AS counterpart_id,
                   a.name AS counterpart_name, a.image_link AS counterpart_image,
                   s.start_time
            FROM shows s
            LEFT JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(&mut *conn)
        .await?;

        let slots = slots_from_rows(rows, "venue", venue_id)?;
        Ok(Schedule::partition(slots, now))
    }

    /// Venues an artist is booked at, split into upcoming and past
    pub async fn artist_schedule(&self, artist_id: i64) -> Result<Schedule> {
        let now = self.clock.now();
        let mut conn = self.pool.acquire().await?;

        if !row_exists(&mut *conn, "SELECT id FROM artists WHERE id = ?", artist_id).await? {
            return Err(Error::not_found("artist", artist_id));
        }

        let rows = sqlx::query(
            r#"
            SELECT s.id AS show_id, s.venue_id AS counterpart_id,
                   v.name AS counterpart_name, v.image_link AS counterpart_image,
                   s.start_time
            FROM shows s
            LEFT JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(&mut *conn)
        .await?;

        let slots = slots_from_rows(rows, "artist", artist_id)?;
        Ok(Schedule::partition(slots, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    use crate::db::init_memory_database;
    use crate::models::{NewArtist, NewShow, NewVenue};
    use crate::time::FixedClock;

    fn slot(id: i64, start_time: DateTime<Utc>) -> ShowSlot {
        ShowSlot {
            id,
            name: format!("slot {}", id),
            image_link: None,
            start_time,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_boundary_is_upcoming() {
        assert!(is_upcoming(now(), now()));
        assert!(is_upcoming(now() + Duration::seconds(1), now()));
        assert!(!is_upcoming(now() - Duration::seconds(1), now()));
    }

    #[test]
    fn test_partition_orders_each_side() {
        let slots = vec![
            slot(1, now() - Duration::days(10)),
            slot(2, now() + Duration::days(5)),
            slot(3, now() - Duration::days(1)),
            slot(4, now() + Duration::days(1)),
            slot(5, now()),
        ];

        let schedule = Schedule::partition(slots, now());

        let upcoming: Vec<i64> = schedule.upcoming.iter().map(|s| s.id).collect();
        let past: Vec<i64> = schedule.past.iter().map(|s| s.id).collect();
        assert_eq!(upcoming, vec![5, 4, 2]);
        assert_eq!(past, vec![3, 1]);
        assert_eq!(schedule.total(), 5);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::partition(Vec::new(), now());
        assert_eq!(schedule.upcoming_count(), 0);
        assert_eq!(schedule.past_count(), 0);
    }

    async fn seeded() -> (Store, i64, i64) {
        let pool = init_memory_database().await.unwrap();
        let store = Store::with_clock(pool, Arc::new(FixedClock(now())));
        let venue = store
            .create_venue(NewVenue {
                name: Some("Park Square Live Music & Coffee".to_string()),
                city: Some("San Francisco".to_string()),
                state: Some("CA".to_string()),
                image_link: Some("https://images.example/park-square.jpg".to_string()),
                ..NewVenue::default()
            })
            .await
            .unwrap();
        let artist = store
            .create_artist(NewArtist {
                name: Some("Matt Quevedo".to_string()),
                city: Some("New York".to_string()),
                state: Some("NY".to_string()),
                image_link: Some("https://images.example/matt.jpg".to_string()),
                ..NewArtist::default()
            })
            .await
            .unwrap();
        (store, venue.id, artist.id)
    }

    #[tokio::test]
    async fn test_venue_schedule_splits_around_now() {
        let (store, venue_id, artist_id) = seeded().await;
        for offset in [-1, 1] {
            store
                .create_show(NewShow {
                    artist_id,
                    venue_id,
                    start_time: Some(now() + Duration::seconds(offset)),
                })
                .await
                .unwrap();
        }

        let schedule = store.venue_schedule(venue_id).await.unwrap();
        assert_eq!(schedule.upcoming_count(), 1);
        assert_eq!(schedule.past_count(), 1);
        assert_eq!(schedule.upcoming[0].start_time, now() + Duration::seconds(1));
        assert_eq!(schedule.past[0].start_time, now() - Duration::seconds(1));
        assert_eq!(schedule.upcoming[0].id, artist_id);
        assert_eq!(schedule.upcoming[0].name, "Matt Quevedo");
        assert_eq!(
            schedule.upcoming[0].image_link.as_deref(),
            Some("https://images.example/matt.jpg")
        );
    }

    #[tokio::test]
    async fn test_artist_schedule_projects_venues() {
        let (store, venue_id, artist_id) = seeded().await;
        store
            .create_show(NewShow { artist_id, venue_id, start_time: None })
            .await
            .unwrap();

        // Default start time is the clock's instant, which counts as upcoming
        let schedule = store.artist_schedule(artist_id).await.unwrap();
        assert_eq!(schedule.upcoming_count(), 1);
        assert_eq!(schedule.upcoming[0].id, venue_id);
        assert_eq!(schedule.upcoming[0].name, "Park Square Live Music & Coffee");
    }

    #[tokio::test]
    async fn test_schedule_of_missing_owner() {
        let (store, _, _) = seeded().await;
        assert!(matches!(
            store.venue_schedule(404).await,
            Err(Error::NotFound { entity: "venue", .. })
        ));
        assert!(matches!(
            store.artist_schedule(404).await,
            Err(Error::NotFound { entity: "artist", .. })
        ));
    }

    #[tokio::test]
    async fn test_dangling_show_is_skipped() {
        let (store, venue_id, artist_id) = seeded().await;
        store
            .create_show(NewShow { artist_id, venue_id, start_time: None })
            .await
            .unwrap();

        // Simulate a legacy database without enforced foreign keys
        let mut conn = store.pool().acquire().await.unwrap();
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut *conn)
            .await
            .unwrap();
        sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(artist_id)
            .execute(&mut *conn)
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut *conn)
            .await
            .unwrap();
        drop(conn);

        let schedule = store.venue_schedule(venue_id).await.unwrap();
        assert_eq!(schedule.total(), 0);
        assert!(store.shows().await.unwrap().is_empty());
    }
}
