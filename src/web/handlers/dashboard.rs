//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::domain::entities::Link;
use crate::state::AppState;

/// Message shown when the store cannot be read.
const STORE_DOWN_MESSAGE: &str = "Links are temporarily unavailable. Please try again shortly.";

/// Query string for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Title filter.
    pub q: Option<String>,
    /// Flash message from a previous form submission.
    pub msg: Option<String>,
}

/// One row of the link list.
pub struct LinkView {
    pub code: String,
    pub title: String,
    pub target_url: String,
    pub short_url: String,
    pub created: String,
    pub last_clicked: String,
    pub total_clicks: u64,
}

impl LinkView {
    fn new(link: Link, short_url: String) -> Self {
        Self {
            short_url,
            created: link.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            last_clicked: link
                .last_clicked
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "-".to_string()),
            code: link.code,
            title: link.title,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
        }
    }
}

/// Template for the dashboard page.
///
/// Renders `templates/dashboard.html` with:
/// - Title search box
/// - Link list with copyable short URLs and click counts
/// - Create form (and admin secret field when one is configured)
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub links: Vec<LinkView>,
    pub total: usize,
    pub query: String,
    pub message: Option<String>,
    pub admin_required: bool,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /?q=<title filter>&msg=<flash message>`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    render_dashboard(&state, query).await
}

/// Builds the dashboard for `query`.
///
/// A store failure never fails the page: it renders an empty list with a
/// generic message instead.
pub async fn render_dashboard(state: &AppState, query: DashboardQuery) -> DashboardTemplate {
    let filter = query.q.unwrap_or_default();
    let mut message = query.msg.filter(|m| !m.trim().is_empty());

    let links = match state.link_service.list_filtered(&filter).await {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard could not load links");
            message.get_or_insert_with(|| STORE_DOWN_MESSAGE.to_string());
            Vec::new()
        }
    };

    let links: Vec<LinkView> = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&state.base_url, &link.code);
            LinkView::new(link, short_url)
        })
        .collect();

    DashboardTemplate {
        total: links.len(),
        links,
        query: filter,
        message,
        admin_required: state.admin_secret.is_some(),
    }
}
