//! Venue routes
//!
//! Reads answer with JSON. Form submissions answer with a `303` redirect
//! carrying a notice.

use axum::{
    extract::{Path, State},
    response::Response,
    Form, Json,
};
use chrono::{DateTime, Utc};
use gigbook_common::aggregate::Area;
use gigbook_common::models::Venue;
use gigbook_common::resolver::ShowSlot;
use gigbook_common::Error;
use serde::Serialize;
use tracing::error;

use super::{display_time, SearchResponse};
use crate::error::ApiResult;
use crate::forms::{SearchForm, VenueForm};
use crate::notice::Notice;
use crate::AppState;

/// Artist booked at a venue
#[derive(Debug, Serialize)]
pub struct ArtistShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl From<ShowSlot> for ArtistShow {
    fn from(slot: ShowSlot) -> Self {
        Self {
            artist_id: slot.id,
            artist_name: slot.name,
            artist_image_link: slot.image_link,
            start_time_display: display_time(slot.start_time),
            start_time: slot.start_time,
        }
    }
}

/// Venue page: stored fields plus its shows split at the current instant
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /venues
pub async fn list_areas(State(state): State<AppState>) -> ApiResult<Json<Vec<Area>>> {
    Ok(Json(state.store.areas().await?))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> ApiResult<Json<SearchResponse>> {
    let results = state.store.search_venues(&form.search_term).await?;
    Ok(Json(SearchResponse {
        search_term: form.search_term,
        results,
    }))
}

/// GET /venues/:venue_id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<VenueDetail>> {
    let venue = state.store.venue(venue_id).await?;
    let schedule = state.store.venue_schedule(venue_id).await?;

    Ok(Json(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres: venue.genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website_link,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: schedule.past_count(),
        upcoming_shows_count: schedule.upcoming_count(),
        past_shows: schedule.past.into_iter().map(ArtistShow::from).collect(),
        upcoming_shows: schedule.upcoming.into_iter().map(ArtistShow::from).collect(),
    }))
}

/// POST /venues, POST /venues/create
pub async fn create_venue(State(state): State<AppState>, Form(form): Form<VenueForm>) -> Response {
    let name = form.name.clone().unwrap_or_default();

    match state.store.create_venue(form.into_new()).await {
        Ok(venue) => Notice::success(format!("Venue {} was successfully listed!", venue.name)).redirect("/"),
        Err(e) => {
            error!("Failed to create venue '{}': {}", name, e);
            Notice::error(format!("An error occurred. Venue {} could not be listed.", name)).redirect("/")
        }
    }
}

/// GET /venues/:venue_id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<Venue>> {
    Ok(Json(state.store.venue(venue_id).await?))
}

/// POST /venues/:venue_id, POST /venues/:venue_id/edit
pub async fn update_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> ApiResult<Response> {
    match state.store.update_venue(venue_id, form.into_changes()).await {
        Ok(_) => Ok(Notice::success("Record Updated Successfully!").redirect(&format!("/venues/{}", venue_id))),
        Err(e @ Error::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            error!("Failed to update venue {}: {}", venue_id, e);
            let message = match e {
                Error::Validation(reason) => format!("An error occurred. Venue could not be updated: {}", reason),
                _ => "An error occurred. Venue could not be updated.".to_string(),
            };
            Ok(Notice::error(message).redirect(&format!("/venues/{}/edit", venue_id)))
        }
    }
}

/// DELETE /venues/:venue_id, POST /venues/:venue_id/delete
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Response> {
    match state.store.delete_venue(venue_id).await {
        Ok(_) => Ok(Notice::success("Record Deleted Successfully").redirect("/")),
        Err(e @ Error::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            error!("Failed to delete venue {}: {}", venue_id, e);
            Ok(Notice::error("An error occurred. Venue could not be deleted.")
                .redirect(&format!("/venues/{}", venue_id)))
        }
    }
}
