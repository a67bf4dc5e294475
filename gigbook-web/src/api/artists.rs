//! Artist routes

use axum::{
    extract::{Path, State},
    response::Response,
    Form, Json,
};
use chrono::{DateTime, Utc};
use gigbook_common::models::Artist;
use gigbook_common::resolver::ShowSlot;
use gigbook_common::Error;
use serde::Serialize;
use tracing::error;

use super::{display_time, SearchResponse};
use crate::error::ApiResult;
use crate::forms::{ArtistForm, SearchForm};
use crate::notice::Notice;
use crate::AppState;

/// Venue an artist is booked at
#[derive(Debug, Serialize)]
pub struct VenueShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl From<ShowSlot> for VenueShow {
    fn from(slot: ShowSlot) -> Self {
        Self {
            venue_id: slot.id,
            venue_name: slot.name,
            venue_image_link: slot.image_link,
            start_time_display: display_time(slot.start_time),
            start_time: slot.start_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<ArtistSummary>>> {
    let artists = state.store.artists().await?;
    Ok(Json(
        artists
            .into_iter()
            .map(|a| ArtistSummary { id: a.id, name: a.name })
            .collect(),
    ))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> ApiResult<Json<SearchResponse>> {
    let results = state.store.search_artists(&form.search_term).await?;
    Ok(Json(SearchResponse {
        search_term: form.search_term,
        results,
    }))
}

/// GET /artists/:artist_id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<ArtistDetail>> {
    let artist = state.store.artist(artist_id).await?;
    let schedule = state.store.artist_schedule(artist_id).await?;

    Ok(Json(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres: artist.genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website_link,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: schedule.past_count(),
        upcoming_shows_count: schedule.upcoming_count(),
        past_shows: schedule.past.into_iter().map(VenueShow::from).collect(),
        upcoming_shows: schedule.upcoming.into_iter().map(VenueShow::from).collect(),
    }))
}

/// POST /artists, POST /artists/create
pub async fn create_artist(State(state): State<AppState>, Form(form): Form<ArtistForm>) -> Response {
    let name = form.name.clone().unwrap_or_default();

    match state.store.create_artist(form.into_new()).await {
        Ok(artist) => Notice::success(format!("Artist {} was successfully listed!", artist.name)).redirect("/"),
        Err(e) => {
            error!("Failed to create artist '{}': {}", name, e);
            Notice::error(format!("An error occurred. Artist {} could not be listed.", name)).redirect("/")
        }
    }
}

/// GET /artists/:artist_id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<Artist>> {
    Ok(Json(state.store.artist(artist_id).await?))
}

/// POST /artists/:artist_id, POST /artists/:artist_id/edit
pub async fn update_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> ApiResult<Response> {
    match state.store.update_artist(artist_id, form.into_changes()).await {
        Ok(_) => Ok(Notice::success("Record Updated Successfully!").redirect(&format!("/artists/{}", artist_id))),
        Err(e @ Error::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            error!("Failed to update artist {}: {}", artist_id, e);
            let message = match e {
                Error::Validation(reason) => format!("An error occurred. Artist could not be updated: {}", reason),
                _ => "An error occurred. Artist could not be updated.".to_string(),
            };
            Ok(Notice::error(message).redirect(&format!("/artists/{}/edit", artist_id)))
        }
    }
}

/// DELETE /artists/:artist_id, POST /artists/:artist_id/delete
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Response> {
    match state.store.delete_artist(artist_id).await {
        Ok(_) => Ok(Notice::success("Record Deleted Successfully").redirect("/")),
        Err(e @ Error::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            error!("Failed to delete artist {}: {}", artist_id, e);
            Ok(Notice::error("An error occurred. Artist could not be deleted.")
                .redirect(&format!("/artists/{}", artist_id)))
        }
    }
}
