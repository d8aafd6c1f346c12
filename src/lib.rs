//! # TinyLink
//!
//! A short-link dashboard and redirect service built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link entity, repository trait, and path resolution
//! - **Application Layer** ([`application`]) - Link and redirect services
//! - **Infrastructure Layer** ([`infrastructure`]) - Local and remote stores, readiness probe
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML dashboard for link management
//!
//! ## Features
//!
//! - Local JSON store seeded from a static file or URL, or a remote link service
//! - Random or custom short codes with collision checks
//! - Click counting on redirect
//! - Startup readiness probe with capped exponential backoff
//!
//! ## Quick Start
//!
//! ```bash
//! export STORE_BACKEND="local"
//! export SEED_SOURCE="static/links.json"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, RedirectService};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
