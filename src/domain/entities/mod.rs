//! Core domain entities.
//!
//! - [`Link`] - A short-link record
//! - [`NewLink`] - Input for creating a record

pub mod link;

pub use link::{Link, NewLink};
