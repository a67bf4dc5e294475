//! Show bookings
//!
//! Shows are create-only. A show without a start time is stamped with the
//! clock's current instant when it is inserted.

use sqlx::Row;
use tracing::{info, warn};

use super::{decode_instant, row_exists, Store};
use crate::models::{NewShow, Show, ShowListing};
use crate::time::to_millis;
use crate::{Error, Result};

impl Store {
    /// Book an artist at a venue
    ///
    /// Both ids must reference existing records.
    pub async fn create_show(&self, new_show: NewShow) -> Result<Show> {
        let start_time = new_show.start_time.unwrap_or_else(|| self.clock.now());

        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, "SELECT id FROM artists WHERE id = ?", new_show.artist_id).await? {
            return Err(Error::not_found("artist", new_show.artist_id));
        }
        if !row_exists(&mut *tx, "SELECT id FROM venues WHERE id = ?", new_show.venue_id).await? {
            return Err(Error::not_found("venue", new_show.venue_id));
        }

        let result = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
            .bind(new_show.artist_id)
            .bind(new_show.venue_id)
            .bind(to_millis(start_time))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let show = Show {
            id: result.last_insert_rowid(),
            artist_id: new_show.artist_id,
            venue_id: new_show.venue_id,
            start_time,
        };
        info!(
            "Show {} listed: artist {} at venue {} on {}",
            show.id, show.artist_id, show.venue_id, show.start_time
        );
        Ok(show)
    }

    /// Every show with venue and artist names, ordered by start time
    ///
    /// Shows whose artist or venue row is gone are skipped and logged.
    pub async fn shows(&self) -> Result<Vec<ShowListing>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.venue_id, v.name AS venue_name, s.artist_id,
                   a.name AS artist_name, a.image_link AS artist_image_link,
                   s.start_time
            FROM shows s
            LEFT JOIN venues v ON v.id = s.venue_id
            LEFT JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut listings = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let venue_name: Option<String> = row.try_get("venue_name")?;
            let artist_name: Option<String> = row.try_get("artist_name")?;
            let (Some(venue_name), Some(artist_name)) = (venue_name, artist_name) else {
                warn!("Skipping show {}: artist or venue no longer exists", id);
                continue;
            };
            listings.push(ShowListing {
                id,
                venue_id: row.try_get("venue_id")?,
                venue_name,
                artist_id: row.try_get("artist_id")?,
                artist_name,
                artist_image_link: row.try_get("artist_image_link")?,
                start_time: decode_instant(row.try_get("start_time")?)?,
            });
        }
        Ok(listings)
    }
}
