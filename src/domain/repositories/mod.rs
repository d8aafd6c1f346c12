//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link collection load/save and per-record updates

pub mod link_repository;

pub use link_repository::{LinkRepository, ensure_code_free};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
