//! Infrastructure layer for external integrations.
//!
//! Implements the storage interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Local-file and remote-service link repositories
//! - [`probe`] - Startup readiness probe with capped exponential backoff

pub mod persistence;
pub mod probe;
