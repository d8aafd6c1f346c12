//! Domain layer containing business entities and logic.
//!
//! Independent of storage and HTTP concerns.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`redirect`] - Pure short-code resolution
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{path}`
//! 2. [`crate::application::services::RedirectService`] loads the collection
//! 3. [`redirect::resolve`] picks the matching record, if any
//! 4. The click is recorded and the visitor is redirected; otherwise the dashboard renders

pub mod entities;
pub mod redirect;
pub mod repositories;
