//! Show routes

use axum::{extract::State, response::Response, Form, Json};
use chrono::{DateTime, Utc};
use gigbook_common::models::ShowListing;
use serde::Serialize;
use tracing::error;

use crate::error::ApiResult;
use crate::format::{format_datetime, DateFormat};
use crate::forms::ShowForm;
use crate::notice::Notice;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl From<ShowListing> for ShowEntry {
    fn from(show: ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time_display: format_datetime(show.start_time, DateFormat::Medium),
            start_time: show.start_time,
        }
    }
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Vec<ShowEntry>>> {
    let shows = state.store.shows().await?;
    Ok(Json(shows.into_iter().map(ShowEntry::from).collect()))
}

/// POST /shows, POST /shows/create
pub async fn create_show(State(state): State<AppState>, Form(form): Form<ShowForm>) -> Response {
    let result = match form.into_new() {
        Ok(new_show) => state.store.create_show(new_show).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Notice::success("Show was successfully listed!").redirect("/"),
        Err(e) => {
            error!("Failed to create show: {}", e);
            Notice::error("An error occurred. Show could not be listed.").redirect("/")
        }
    }
}
