//! Server-rendered dashboard.
//!
//! `GET /` renders the link list with search and a create form; the form
//! posts land under `/dashboard` and redirect back with a flash message.

pub mod handlers;
pub mod routes;
