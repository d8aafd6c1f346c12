//! Link repository backed by a remote REST link service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Request body for `POST /links`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLinkBody<'a> {
    title: &'a str,
    target_url: &'a str,
    code: &'a str,
}

/// Repository talking to a remote link service.
///
/// # Endpoints
///
/// - `GET    {base}/links`              - full collection
/// - `POST   {base}/links`              - create, returns the stored record (409 = code taken)
/// - `DELETE {base}/links/{code}`       - delete (404 = absent)
/// - `POST   {base}/links/{code}/click` - count a click, returns the record
///
/// `save` has no endpoint of its own; it reconciles membership by deleting
/// remote records missing locally and posting local records missing
/// remotely. Click counters stay owned by the remote service.
pub struct RemoteLinkRepository {
    base_url: Url,
    client: reqwest::Client,
}

impl RemoteLinkRepository {
    /// Creates a client for the link service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `base_url` is not an absolute URL,
    /// or [`AppError::Unavailable`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AppError::bad_request(
                "Invalid link service URL",
                json!({ "url": base_url, "reason": e.to_string() }),
            )
        })?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::internal(
                    "Link service URL cannot have a path",
                    json!({ "url": self.base_url.as_str() }),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl LinkRepository for RemoteLinkRepository {
    async fn load(&self) -> Result<Vec<Link>, AppError> {
        let links = self
            .client
            .get(self.endpoint(&["links"])?)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Link>>()
            .await?;

        debug!(count = links.len(), "Loaded links from link service");
        Ok(links)
    }

    async fn save(&self, links: &[Link]) -> Result<(), AppError> {
        let remote = self.load().await?;

        let local_codes: HashSet<&str> = links.iter().map(|l| l.code.as_str()).collect();
        let remote_codes: HashSet<&str> = remote.iter().map(|l| l.code.as_str()).collect();

        for stale in remote_codes.difference(&local_codes) {
            self.remove(stale).await?;
        }

        for link in links.iter().filter(|l| !remote_codes.contains(l.code.as_str())) {
            self.insert(link.clone()).await?;
        }

        Ok(())
    }

    async fn insert(&self, link: Link) -> Result<Link, AppError> {
        let body = CreateLinkBody {
            title: &link.title,
            target_url: &link.target_url,
            code: &link.code,
        };

        let response = self
            .client
            .post(self.endpoint(&["links"])?)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": link.code }),
            ));
        }

        let created = response.error_for_status()?.json::<Link>().await?;
        Ok(created)
    }

    async fn remove(&self, code: &str) -> Result<bool, AppError> {
        let response = self
            .client
            .delete(self.endpoint(&["links", code])?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        response.error_for_status()?;
        Ok(true)
    }

    async fn record_click(
        &self,
        code: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        let response = self
            .client
            .post(self.endpoint(&["links", code, "click"])?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let updated = response.error_for_status()?.json::<Link>().await?;
        Ok(Some(updated))
    }

    async fn is_ready(&self) -> bool {
        let Ok(url) = self.endpoint(&["links"]) else {
            return false;
        };

        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Link service not reachable");
                false
            }
        }
    }
}
