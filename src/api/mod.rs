//! JSON API under `/api`, plus the redirect and health handlers mounted at the root.
//!
//! Reads and click counting are open. Creating and deleting links pass
//! through [`middleware::auth`] when `ADMIN_SECRET` is configured.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
