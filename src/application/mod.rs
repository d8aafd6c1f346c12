//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link listing, creation, deletion, click counting
//! - [`services::redirect_service::RedirectService`] - Short-code redirect resolution
pub mod services;
