//! HTML template rendering handlers for the web dashboard.

pub mod dashboard;
mod links;

pub use dashboard::dashboard_handler;
pub use links::{create_link_form_handler, delete_link_form_handler};
