//! Venue persistence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::{decode_genres, encode_genres, row_exists, Store};
use crate::models::{NewVenue, Venue, VenueChanges};
use crate::{Error, Result};

const SELECT_VENUE: &str = r#"
    SELECT id, name, city, state, address, phone, image_link, facebook_link,
           website_link, genres, seeking_talent, seeking_description
    FROM venues
"#;

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    let genres: String = row.try_get("genres")?;
    Ok(Venue {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website_link: row.try_get("website_link")?,
        genres: decode_genres(&genres)?,
        seeking_talent: row.try_get("seeking_talent")?,
        seeking_description: row.try_get("seeking_description")?,
    })
}

impl Store {
    /// Insert a venue and return it with its generated id
    pub async fn create_venue(&self, new_venue: NewVenue) -> Result<Venue> {
        let mut venue = new_venue.validate()?;
        let genres = encode_genres(&venue.genres)?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, image_link, facebook_link,
                website_link, genres, seeking_talent, seeking_description
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(&genres)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        venue.id = result.last_insert_rowid();
        info!("Venue {} listed: {}", venue.id, venue.name);
        Ok(venue)
    }

    pub async fn venue(&self, id: i64) -> Result<Venue> {
        let sql = format!("{} WHERE id = ?", SELECT_VENUE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("venue", id))?;
        venue_from_row(&row)
    }

    /// All venues ordered by id
    pub async fn venues(&self) -> Result<Vec<Venue>> {
        let sql = format!("{} ORDER BY id", SELECT_VENUE);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(venue_from_row).collect()
    }

    /// Apply a partial update and return the stored result
    ///
    /// Read-modify-write inside one transaction. Concurrent updates are not
    /// detected: the last commit wins.
    pub async fn update_venue(&self, id: i64, changes: VenueChanges) -> Result<Venue> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ?", SELECT_VENUE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::not_found("venue", id))?;
        let mut venue = venue_from_row(&row)?;
        changes.apply(&mut venue)?;
        let genres = encode_genres(&venue.genres)?;

        sqlx::query(
            r#"
            UPDATE venues SET
                name = ?, city = ?, state = ?, address = ?, phone = ?,
                image_link = ?, facebook_link = ?, website_link = ?,
                genres = ?, seeking_talent = ?, seeking_description = ?
            WHERE id = ?
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(&genres)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!("Venue {} updated", id);
        Ok(venue)
    }

    /// Delete a venue together with every show booked there
    ///
    /// Returns the number of shows removed.
    pub async fn delete_venue(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, "SELECT id FROM venues WHERE id = ?", id).await? {
            return Err(Error::not_found("venue", id));
        }

        let shows_removed = sqlx::query("DELETE FROM shows WHERE venue_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Venue {} deleted ({} shows removed)", id, shows_removed);
        Ok(shows_removed)
    }
}
