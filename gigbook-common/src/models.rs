//! Database models
//!
//! Venue and Artist are independent top-level records; Show is a join
//! record referencing both by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Show joined with the names of both sides, for the show listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Venue as submitted for creation. Required fields are optional here so a
/// missing one surfaces as [`Error::Validation`] instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVenue {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl NewVenue {
    /// Validate required fields and normalize the rest. The returned venue
    /// carries id 0 until the store assigns one.
    pub fn validate(self) -> Result<Venue> {
        Ok(Venue {
            id: 0,
            name: required("name", self.name)?,
            city: required("city", self.city)?,
            state: required("state", self.state)?,
            address: optional(self.address),
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website_link: optional(self.website_link),
            genres: normalize_genres(self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewArtist {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
}

impl NewArtist {
    pub fn validate(self) -> Result<Artist> {
        Ok(Artist {
            id: 0,
            name: required("name", self.name)?,
            city: required("city", self.city)?,
            state: required("state", self.state)?,
            phone: optional(self.phone),
            genres: normalize_genres(self.genres),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            website_link: optional(self.website_link),
        })
    }
}

/// Booking request. Without a start time the store stamps the show with the
/// clock's current instant at insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: Option<DateTime<Utc>>,
}

/// Partial venue update
///
/// `None` leaves a field unchanged. Nullable fields use `Option<Option<_>>`
/// so `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct VenueChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website_link: Option<Option<String>>,
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<Option<String>>,
}

impl VenueChanges {
    /// Merge into an existing venue, re-validating required fields
    pub fn apply(self, venue: &mut Venue) -> Result<()> {
        if let Some(name) = self.name {
            venue.name = required("name", Some(name))?;
        }
        if let Some(city) = self.city {
            venue.city = required("city", Some(city))?;
        }
        if let Some(state) = self.state {
            venue.state = required("state", Some(state))?;
        }
        merge_optional(&mut venue.address, self.address);
        merge_optional(&mut venue.phone, self.phone);
        merge_optional(&mut venue.image_link, self.image_link);
        merge_optional(&mut venue.facebook_link, self.facebook_link);
        merge_optional(&mut venue.website_link, self.website_link);
        merge_optional(&mut venue.seeking_description, self.seeking_description);
        if let Some(genres) = self.genres {
            venue.genres = normalize_genres(genres);
        }
        if let Some(seeking) = self.seeking_talent {
            venue.seeking_talent = seeking;
        }
        Ok(())
    }
}

/// Partial artist update, same conventions as [`VenueChanges`]
#[derive(Debug, Clone, Default)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<Option<String>>,
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<Option<String>>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website_link: Option<Option<String>>,
}

impl ArtistChanges {
    pub fn apply(self, artist: &mut Artist) -> Result<()> {
        if let Some(name) = self.name {
            artist.name = required("name", Some(name))?;
        }
        if let Some(city) = self.city {
            artist.city = required("city", Some(city))?;
        }
        if let Some(state) = self.state {
            artist.state = required("state", Some(state))?;
        }
        merge_optional(&mut artist.phone, self.phone);
        merge_optional(&mut artist.seeking_description, self.seeking_description);
        merge_optional(&mut artist.image_link, self.image_link);
        merge_optional(&mut artist.facebook_link, self.facebook_link);
        merge_optional(&mut artist.website_link, self.website_link);
        if let Some(genres) = self.genres {
            artist.genres = normalize_genres(genres);
        }
        if let Some(seeking) = self.seeking_venue {
            artist.seeking_venue = seeking;
        }
        Ok(())
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Validation(format!("{} is required", field))),
    }
}

// Blank strings are stored as NULL
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn merge_optional(target: &mut Option<String>, change: Option<Option<String>>) {
    if let Some(value) = change {
        *target = optional(value);
    }
}

fn normalize_genres(genres: Vec<String>) -> Vec<String> {
    genres
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect()
}
