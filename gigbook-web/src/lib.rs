//! gigbook-web library - HTTP surface of the booking directory
//!
//! Routes decode forms, call into the `gigbook-common` store and render its
//! outputs as JSON or as redirects carrying a notice.

use axum::routing::{get, post};
use axum::Router;
use gigbook_common::Store;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod format;
pub mod forms;
pub mod notice;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use api::{artists, shows, venues};

    let venue_routes: Router<AppState> = Router::new()
        .route("/venues", get(venues::list_areas).post(venues::create_venue))
        .route("/venues/create", post(venues::create_venue))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/:venue_id",
            get(venues::show_venue)
                .post(venues::update_venue)
                .delete(venues::delete_venue),
        )
        .route(
            "/venues/:venue_id/edit",
            get(venues::edit_venue).post(venues::update_venue),
        )
        .route(
            "/venues/:venue_id/delete",
            post(venues::delete_venue).delete(venues::delete_venue),
        );

    let artist_routes: Router<AppState> = Router::new()
        .route("/artists", get(artists::list_artists).post(artists::create_artist))
        .route("/artists/create", post(artists::create_artist))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/:artist_id",
            get(artists::show_artist)
                .post(artists::update_artist)
                .delete(artists::delete_artist),
        )
        .route(
            "/artists/:artist_id/edit",
            get(artists::edit_artist).post(artists::update_artist),
        )
        .route(
            "/artists/:artist_id/delete",
            post(artists::delete_artist).delete(artists::delete_artist),
        );

    let show_routes: Router<AppState> = Router::new()
        .route("/shows", get(shows::list_shows).post(shows::create_show))
        .route("/shows/create", post(shows::create_show));

    Router::new()
        .route("/", get(api::serve_index))
        .merge(api::health_routes())
        .merge(venue_routes)
        .merge(artist_routes)
        .merge(show_routes)
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
