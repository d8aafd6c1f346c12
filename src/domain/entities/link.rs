//! Link entity representing a short-link record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A short-link record.
///
/// Serializes with snake_case field names. Deserialization also accepts the
/// field names used by older seed files and link-service revisions
/// (`id`, `targetUrl`, `createdAt`, `posted_at`, `totalClicks`, ...), so a
/// single type covers every stored shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(alias = "id", deserialize_with = "string_or_number")]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "targetUrl")]
    pub target_url: String,
    #[serde(default, alias = "createdAt", alias = "posted_at", alias = "postedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "lastClicked")]
    pub last_clicked: Option<DateTime<Utc>>,
    #[serde(default, alias = "totalClicks", alias = "clicks")]
    pub total_clicks: u64,
}

impl Link {
    /// Creates a fresh record with no clicks.
    pub fn new(code: String, title: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            title,
            target_url,
            created_at,
            last_clicked: None,
            total_clicks: 0,
        }
    }

    /// Counts one click at `now`.
    ///
    /// `last_clicked` never moves backwards, even if the clock does.
    pub fn register_click(&mut self, now: DateTime<Utc>) {
        self.total_clicks = self.total_clicks.saturating_add(1);
        self.last_clicked = Some(match self.last_clicked {
            Some(prev) if prev > now => prev,
            _ => now,
        });
    }

    /// Returns true if the record has somewhere to redirect to.
    pub fn has_target(&self) -> bool {
        !self.target_url.trim().is_empty()
    }

    /// Case-insensitive title search used by the dashboard filter.
    pub fn matches_title(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Input data for creating a new link.
///
/// `code` is optional; when absent the service generates one.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub title: String,
    pub target_url: String,
    pub code: Option<String>,
}

/// Some link-service revisions key records by a numeric `id`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
