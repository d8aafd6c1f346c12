//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// Application state cloned into every request.
///
/// Holds the link store (the only owner of link data) plus the values the
/// handlers need to render short URLs and gate admin routes.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    /// Public base URL without trailing slash.
    pub base_url: Arc<str>,
    /// Bearer secret for mutating API routes; `None` leaves them open.
    pub admin_secret: Option<Arc<str>>,
}

impl AppState {
    /// Wires services around a repository.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        code_length: usize,
        base_url: &str,
        admin_secret: Option<&str>,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(repository, code_length));
        let redirect_service = Arc::new(RedirectService::new(link_service.clone()));

        Self {
            link_service,
            redirect_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            admin_secret: admin_secret.map(Arc::from),
        }
    }
}
