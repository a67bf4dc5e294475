//! Form decoding
//!
//! Submitted forms carry every value as text. This is the only place where
//! comma-separated genres become a list and checkbox strings become bools.

use chrono::{DateTime, NaiveDateTime, Utc};
use gigbook_common::models::{ArtistChanges, NewArtist, NewShow, NewVenue, VenueChanges};
use gigbook_common::{Error, Result};
use serde::Deserialize;

/// Accepted layouts for a start time without an offset (read as UTC)
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Venue create/edit form
///
/// Browsers leave unchecked checkboxes out of the submission, so a missing
/// checkbox means false on create and on edit. Other missing fields are left
/// unchanged on edit.
#[derive(Debug, Default, Deserialize)]
pub struct VenueForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn into_new(self) -> NewVenue {
        NewVenue {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            genres: self.genres.as_deref().map(split_genres).unwrap_or_default(),
            seeking_talent: parse_checkbox(self.seeking_talent.as_deref()).unwrap_or(false),
            seeking_description: self.seeking_description,
        }
    }

    pub fn into_changes(self) -> VenueChanges {
        VenueChanges {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address.map(Some),
            phone: self.phone.map(Some),
            image_link: self.image_link.map(Some),
            facebook_link: self.facebook_link.map(Some),
            website_link: self.website_link.map(Some),
            genres: self.genres.as_deref().map(split_genres),
            seeking_talent: Some(parse_checkbox(self.seeking_talent.as_deref()).unwrap_or(false)),
            seeking_description: self.seeking_description.map(Some),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtistForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
}

impl ArtistForm {
    pub fn into_new(self) -> NewArtist {
        NewArtist {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres.as_deref().map(split_genres).unwrap_or_default(),
            seeking_venue: parse_checkbox(self.seeking_venue.as_deref()).unwrap_or(false),
            seeking_description: self.seeking_description,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
        }
    }

    pub fn into_changes(self) -> ArtistChanges {
        ArtistChanges {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone.map(Some),
            genres: self.genres.as_deref().map(split_genres),
            seeking_venue: Some(parse_checkbox(self.seeking_venue.as_deref()).unwrap_or(false)),
            seeking_description: self.seeking_description.map(Some),
            image_link: self.image_link.map(Some),
            facebook_link: self.facebook_link.map(Some),
            website_link: self.website_link.map(Some),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ShowForm {
    pub artist_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_time: Option<String>,
}

impl ShowForm {
    pub fn into_new(self) -> Result<NewShow> {
        Ok(NewShow {
            artist_id: parse_id("artist_id", self.artist_id.as_deref())?,
            venue_id: parse_id("venue_id", self.venue_id.as_deref())?,
            start_time: parse_start_time(self.start_time.as_deref().unwrap_or(""))?,
        })
    }
}

/// `"Jazz, Reggae ,Swing"` → `["Jazz", "Reggae", "Swing"]`
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// HTML checkbox value. `None` when the field was not submitted.
pub fn parse_checkbox(raw: Option<&str>) -> Option<bool> {
    raw.map(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "on" | "true" | "1"
        )
    })
}

fn parse_id(field: &str, raw: Option<&str>) -> Result<i64> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    raw.parse()
        .map_err(|_| Error::Validation(format!("{} must be a number, got '{}'", field, raw)))
}

/// Blank means "use the default start time"
pub fn parse_start_time(raw: &str) -> Result<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| Error::Validation(format!("start_time '{}' is not a valid date and time", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_split_genres() {
        assert_eq!(split_genres("Jazz, Reggae ,Swing"), vec!["Jazz", "Reggae", "Swing"]);
        assert_eq!(split_genres("Folk"), vec!["Folk"]);
        assert!(split_genres(" , ").is_empty());
    }

    #[test]
    fn test_parse_checkbox() {
        assert_eq!(parse_checkbox(Some("y")), Some(true));
        assert_eq!(parse_checkbox(Some("on")), Some(true));
        assert_eq!(parse_checkbox(Some("False")), Some(false));
        assert_eq!(parse_checkbox(Some("")), Some(false));
        assert_eq!(parse_checkbox(None), None);
    }

    #[test]
    fn test_parse_start_time_layouts() {
        let expected = Utc.with_ymd_and_hms(2030, 2, 1, 20, 0, 0).unwrap();
        for raw in [
            "2030-02-01 20:00:00",
            "2030-02-01T20:00:00",
            "2030-02-01T20:00",
            "2030-02-01T20:00:00Z",
            "2030-02-01T21:00:00+01:00",
        ] {
            assert_eq!(parse_start_time(raw).unwrap(), Some(expected), "{}", raw);
        }
    }

    #[test]
    fn test_blank_start_time_uses_default() {
        assert_eq!(parse_start_time("  ").unwrap(), None);
    }

    #[test]
    fn test_invalid_start_time() {
        assert!(matches!(parse_start_time("next friday"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_show_form_requires_ids() {
        let form = ShowForm {
            artist_id: Some("4".to_string()),
            venue_id: None,
            start_time: None,
        };
        assert!(matches!(form.into_new(), Err(Error::Validation(_))));

        let form = ShowForm {
            artist_id: Some("four".to_string()),
            venue_id: Some("1".to_string()),
            start_time: None,
        };
        assert!(matches!(form.into_new(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_venue_form_on_create() {
        let venue = VenueForm {
            name: Some("The Musical Hop".to_string()),
            genres: Some("Jazz, Reggae, Swing, Classical, Folk".to_string()),
            ..VenueForm::default()
        }
        .into_new();

        assert_eq!(venue.genres.len(), 5);
        assert!(!venue.seeking_talent);
    }

    #[test]
    fn test_venue_form_on_edit_unchecked_box_clears_flag() {
        let changes = VenueForm {
            phone: Some("".to_string()),
            ..VenueForm::default()
        }
        .into_changes();

        assert!(changes.name.is_none());
        assert!(changes.genres.is_none());
        // Unchecked box is not submitted
        assert_eq!(changes.seeking_talent, Some(false));
        // Submitted blank clears the stored phone
        assert_eq!(changes.phone, Some(Some(String::new())));
    }

    #[test]
    fn test_artist_form_on_edit_checkbox() {
        let checked = ArtistForm {
            seeking_venue: Some("y".to_string()),
            ..ArtistForm::default()
        }
        .into_changes();
        assert_eq!(checked.seeking_venue, Some(true));

        let unchecked = ArtistForm::default().into_changes();
        assert_eq!(unchecked.seeking_venue, Some(false));
        assert!(unchecked.name.is_none());
    }
}
