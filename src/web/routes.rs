//! Web dashboard route configuration.

use crate::state::AppState;
use crate::web::handlers::{create_link_form_handler, delete_link_form_handler};
use axum::{Router, routing::post};

/// Dashboard form routes, nested under `/dashboard`.
///
/// The dashboard page itself is served at `/` by the top-level router.
///
/// # Endpoints
///
/// - `POST /links`               - Create a link from the form
/// - `POST /links/{code}/delete` - Delete a link
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_form_handler))
        .route("/links/{code}/delete", post(delete_link_form_handler))
}
