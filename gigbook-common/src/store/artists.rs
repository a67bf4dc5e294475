//! Artist persistence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::{decode_genres, encode_genres, row_exists, Store};
use crate::models::{Artist, ArtistChanges, NewArtist};
use crate::{Error, Result};

const SELECT_ARTIST: &str = r#"
    SELECT id, name, city, state, phone, genres, seeking_venue,
           seeking_description, image_link, facebook_link, website_link
    FROM artists
"#;

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let genres: String = row.try_get("genres")?;
    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        genres: decode_genres(&genres)?,
        seeking_venue: row.try_get("seeking_venue")?,
        seeking_description: row.try_get("seeking_description")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website_link: row.try_get("website_link")?,
    })
}

impl Store {
    pub async fn create_artist(&self, new_artist: NewArtist) -> Result<Artist> {
        let mut artist = new_artist.validate()?;
        let genres = encode_genres(&artist.genres)?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO artists (
                name, city, state, phone, genres, seeking_venue,
                seeking_description, image_link, facebook_link, website_link
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&genres)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        artist.id = result.last_insert_rowid();
        info!("Artist {} listed: {}", artist.id, artist.name);
        Ok(artist)
    }

    pub async fn artist(&self, id: i64) -> Result<Artist> {
        let sql = format!("{} WHERE id = ?", SELECT_ARTIST);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("artist", id))?;
        artist_from_row(&row)
    }

    /// All artists ordered by id
    pub async fn artists(&self) -> Result<Vec<Artist>> {
        let sql = format!("{} ORDER BY id", SELECT_ARTIST);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(artist_from_row).collect()
    }

    /// Apply a partial update; last writer wins
    pub async fn update_artist(&self, id: i64, changes: ArtistChanges) -> Result<Artist> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ?", SELECT_ARTIST);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::not_found("artist", id))?;
        let mut artist = artist_from_row(&row)?;
        changes.apply(&mut artist)?;
        let genres = encode_genres(&artist.genres)?;

        sqlx::query(
            r#"
            UPDATE artists SET
                name = ?, city = ?, state = ?, phone = ?, genres = ?,
                seeking_venue = ?, seeking_description = ?, image_link = ?,
                facebook_link = ?, website_link = ?
            WHERE id = ?
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&genres)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!("Artist {} updated", id);
        Ok(artist)
    }

    /// Delete an artist together with every show they are booked for
    pub async fn delete_artist(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        if !row_exists(&mut *tx, "SELECT id FROM artists WHERE id = ?", id).await? {
            return Err(Error::not_found("artist", id));
        }

        let shows_removed = sqlx::query("DELETE FROM shows WHERE artist_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Artist {} deleted ({} shows removed)", id, shows_removed);
        Ok(shows_removed)
    }
}
