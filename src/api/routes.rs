//! API route configuration.

use crate::api::handlers::{
    click_link_handler, create_link_handler, delete_link_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Read-only and visitor-facing API routes.
///
/// # Endpoints
///
/// - `GET  /links`              - List links (`?q=` filters by title)
/// - `POST /links/{code}/click` - Count a click
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler))
        .route("/links/{code}/click", post(click_link_handler))
}

/// Mutating API routes, gated by [`crate::api::middleware::auth`].
///
/// # Endpoints
///
/// - `POST   /links`        - Create a link
/// - `DELETE /links/{code}` - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/{code}", delete(delete_link_handler))
}
