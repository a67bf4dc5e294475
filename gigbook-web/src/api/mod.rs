//! HTTP API handlers for gigbook-web

pub mod artists;
pub mod health;
pub mod shows;
pub mod ui;
pub mod venues;

pub use health::health_routes;
pub use ui::serve_index;

use axum::http::Uri;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::format::{format_datetime, DateFormat};

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Search response echoing the submitted term
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub results: gigbook_common::aggregate::SearchResults,
}

/// Start time rendered for display next to its RFC 3339 form
pub(crate) fn display_time(start_time: DateTime<Utc>) -> String {
    format_datetime(start_time, DateFormat::Full)
}
