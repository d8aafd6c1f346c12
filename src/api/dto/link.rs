//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{Link, NewLink};

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Request body for `POST /api/links`.
///
/// Accepts both `target_url` and `targetUrl`. Emptiness and URL shape are
/// checked by the service so the messages match the dashboard form.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title: String,

    #[serde(default, alias = "targetUrl")]
    #[validate(length(max = 2048))]
    pub target_url: String,

    /// Optional custom short code. Trimmed; blank means generated.
    #[serde(default, deserialize_with = "trimmed_code")]
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub code: Option<String>,
}

fn trimmed_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty()))
}

impl From<CreateLinkRequest> for NewLink {
    fn from(req: CreateLinkRequest) -> Self {
        NewLink {
            title: req.title,
            target_url: req.target_url,
            code: req.code,
        }
    }
}

/// Query string for `GET /api/links`.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    /// Case-insensitive title filter.
    pub q: Option<String>,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub title: String,
    pub target_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
    pub total_clicks: u64,
}

impl LinkResponse {
    /// Builds the response around an already derived `short_url`.
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            title: link.title,
            target_url: link.target_url,
            short_url,
            created_at: link.created_at,
            last_clicked: link.last_clicked,
            total_clicks: link.total_clicks,
        }
    }
}
