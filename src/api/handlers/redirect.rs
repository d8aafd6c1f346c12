//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::state::AppState;
use crate::web::handlers::dashboard::{DashboardQuery, render_dashboard};

/// Redirects a short code to its target URL, or renders the dashboard.
///
/// # Endpoint
///
/// `GET /{*path}`
///
/// # Request Flow
///
/// 1. Strip leading/trailing `/` from the path
/// 2. Skip empty and reserved asset names (`index.html`, `favicon.ico`, `robots.txt`)
/// 3. Load the collection and look for an exact code match
/// 4. On a match with a non-empty target: count the click, return 307 Temporary Redirect
/// 5. Otherwise (no match or store failure): render the dashboard
pub async fn redirect_handler(Path(path): Path<String>, State(state): State<AppState>) -> Response {
    match state.redirect_service.apply(&path).await {
        Some(target) => {
            debug!(path, target, "Redirecting");
            Redirect::temporary(&target).into_response()
        }
        None => {
            debug!(path, "No redirect, rendering dashboard");
            render_dashboard(&state, DashboardQuery::default())
                .await
                .into_response()
        }
    }
}
