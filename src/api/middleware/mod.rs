//! HTTP middleware for request processing.
//!
//! Provides admin gating and request tracing.

pub mod auth;
pub mod tracing;
