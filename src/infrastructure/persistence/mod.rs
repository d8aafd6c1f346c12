//! Link repository implementations.
//!
//! # Repositories
//!
//! - [`LocalLinkRepository`] - JSON file on disk, seeded from a static file or URL
//! - [`RemoteLinkRepository`] - Remote REST link service

pub mod local_link_repository;
pub mod remote_link_repository;

pub use local_link_repository::{LocalLinkRepository, SeedSource};
pub use remote_link_repository::RemoteLinkRepository;
