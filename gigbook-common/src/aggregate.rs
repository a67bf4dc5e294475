//! Area aggregation and name search
//!
//! Read-only views over venues and artists, each annotated with the number
//! of upcoming shows as of one observation instant per call.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::Row;

use crate::store::Store;
use crate::time::to_millis;
use crate::Result;

/// Venue or artist row in a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one exact (city, state) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Listing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Listing>,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Venue,
    Artist,
}

/// Unicode-aware case-insensitive substring test
pub fn name_matches(name: &str, folded_term: &str) -> bool {
    folded_term.is_empty() || name.to_lowercase().contains(folded_term)
}

impl Store {
    /// Group every venue by (city, state)
    ///
    /// Areas are ordered by state then city; venues within an area by id.
    pub async fn areas(&self) -> Result<Vec<Area>> {
        let now = self.clock.now();
        let counts = self.upcoming_counts(Side::Venue, now).await?;

        let rows = sqlx::query("SELECT id, name, city, state FROM venues ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut areas: BTreeMap<(String, String), Area> = BTreeMap::new();
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let city: String = row.try_get("city")?;
            let state: String = row.try_get("state")?;
            let listing = Listing {
                id,
                name: row.try_get("name")?,
                num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
            };
            areas
                .entry((state.clone(), city.clone()))
                .or_insert_with(|| Area {
                    city,
                    state,
                    venues: Vec::new(),
                })
                .venues
                .push(listing);
        }

        Ok(areas.into_values().collect())
    }

    /// Venues whose name contains `term`, ignoring case. An empty term
    /// matches every venue.
    pub async fn search_venues(&self, term: &str) -> Result<SearchResults> {
        self.search(Side::Venue, term).await
    }

    /// Artists whose name contains `term`, ignoring case
    pub async fn search_artists(&self, term: &str) -> Result<SearchResults> {
        self.search(Side::Artist, term).await
    }

    async fn search(&self, side: Side, term: &str) -> Result<SearchResults> {
        let now = self.clock.now();
        let counts = self.upcoming_counts(side, now).await?;

        // SQLite LIKE only folds ASCII, so matching happens here
        let sql = match side {
            Side::Venue => "SELECT id, name FROM venues ORDER BY id",
            Side::Artist => "SELECT id, name FROM artists ORDER BY id",
        };
        let rows: Vec<(i64, String)> = sqlx::query_as(sql).fetch_all(&self.pool).await?;

        let folded_term = term.to_lowercase();
        let data: Vec<Listing> = rows
            .into_iter()
            .filter(|(_, name)| name_matches(name, &folded_term))
            .map(|(id, name)| Listing {
                id,
                name,
                num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
            })
            .collect();

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    // Shows whose counterpart row is gone are left out, matching the resolver
    async fn upcoming_counts(&self, side: Side, now: DateTime<Utc>) -> Result<HashMap<i64, usize>> {
        let sql = match side {
            Side::Venue => {
                r#"
                SELECT s.venue_id, COUNT(*) FROM shows s
                JOIN artists a ON a.id = s.artist_id
                WHERE s.start_time >= ?
                GROUP BY s.venue_id
                "#
            }
            Side::Artist => {
                r#"
                SELECT s.artist_id, COUNT(*) FROM shows s
                JOIN venues v ON v.id = s.venue_id
                WHERE s.start_time >= ?
                GROUP BY s.artist_id
                "#
            }
        };

        let rows: Vec<(i64, i64)> = sqlx::query_as(sql)
            .bind(to_millis(now))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (id, count as usize))
            .collect())
    }
}
