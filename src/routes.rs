//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Dashboard (search with `?q=`)
//! - `GET  /health`      - Health check: link store reachability
//! - `/api/*`            - REST API (mutations gated by `ADMIN_SECRET` when set)
//! - `/dashboard/*`      - Dashboard form posts
//! - `/static/*`         - Static assets (including the seed file)
//! - `GET  /{*path}`     - Short link redirect, falls back to the dashboard
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer admin secret on mutating API routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::handlers::dashboard_handler;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api_router = api::routes::public_routes().merge(api_protected);

    let router = Router::new()
        .route("/", get(dashboard_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest("/dashboard", web::routes::form_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/{*path}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
