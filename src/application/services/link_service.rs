//! Link collection service: listing, creation, deletion, and click counting.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, ensure_code_free};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::{UrlValidationError, validate_target_url};

/// Maximum number of generated codes tried before creation fails.
const MAX_CODE_ATTEMPTS: usize = 10;

/// The link store handed to the HTTP layer and the CLI.
///
/// All state changes go through the injected [`LinkRepository`]; the service
/// keeps no collection of its own.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    code_length: usize,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>, code_length: usize) -> Self {
        Self {
            repository,
            code_length,
        }
    }

    /// Returns the full collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be read. An
    /// empty store is `Ok(vec![])`.
    pub async fn list(&self) -> Result<Vec<Link>, AppError> {
        self.repository.load().await
    }

    /// Returns records whose title contains `query` (case-insensitive).
    pub async fn list_filtered(&self, query: &str) -> Result<Vec<Link>, AppError> {
        let links = self.repository.load().await?;
        Ok(links
            .into_iter()
            .filter(|link| link.matches_title(query))
            .collect())
    }

    /// Looks up a record by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn get(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .load()
            .await?
            .into_iter()
            .find(|link| link.code == code)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Persists `links` as the whole collection.
    pub async fn save(&self, links: &[Link]) -> Result<(), AppError> {
        self.repository.save(links).await
    }

    /// Generates a random code of `length` characters.
    ///
    /// Uniqueness is not checked here; [`LinkService::create`] retries
    /// against the current collection.
    pub fn generate_code(&self, length: usize) -> String {
        generate_code(length)
    }

    /// Creates and persists a new record.
    ///
    /// # Code Assignment
    ///
    /// - A supplied code is validated and must not already exist
    /// - Otherwise a random code is generated, retrying up to 10 times on collision
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title or URL is empty, the URL
    /// is not absolute http(s), or the custom code is malformed.
    ///
    /// Returns [`AppError::Conflict`] if the custom code is taken or no
    /// unique code was found.
    pub async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let title = new_link.title.trim();
        if title.is_empty() {
            return Err(AppError::bad_request(
                "Enter title",
                json!({ "field": "title" }),
            ));
        }

        let target_url = validate_target_url(&new_link.target_url).map_err(|e| match e {
            UrlValidationError::Empty => {
                AppError::bad_request("Enter URL", json!({ "field": "target_url" }))
            }
            other => AppError::bad_request(
                "Invalid URL",
                json!({ "field": "target_url", "reason": other.to_string() }),
            ),
        })?;

        let existing = self.repository.load().await?;

        let custom = new_link
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let code = match custom {
            Some(custom) => {
                validate_custom_code(custom)?;
                ensure_code_free(&existing, custom)?;
                custom.to_string()
            }
            None => unique_code(&existing, || self.generate_code(self.code_length))?,
        };

        // The repository re-checks the code atomically with the write.
        let link = Link::new(code, title.to_string(), target_url, Utc::now());
        let created = self.repository.insert(link).await?;

        metrics::counter!("tinylink_links_created_total").increment(1);
        tracing::info!(code = %created.code, "Link created");

        Ok(created)
    }

    /// Deletes the record with `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.remove(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        tracing::info!(code, "Link deleted");
        Ok(())
    }

    /// Counts one click on `code` and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn record_click(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .record_click(code, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Returns true if the backing store is reachable.
    pub async fn is_ready(&self) -> bool {
        self.repository.is_ready().await
    }

    /// The backing store, for readiness probing.
    pub fn repository(&self) -> Arc<dyn LinkRepository> {
        self.repository.clone()
    }

    /// Builds the shareable short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

/// Draws codes from `generate` until one is absent from `existing`.
///
/// # Errors
///
/// Returns [`AppError::Conflict`] after 10 colliding attempts.
pub(crate) fn unique_code(
    existing: &[Link],
    mut generate: impl FnMut() -> String,
) -> Result<String, AppError> {
    let taken: HashSet<&str> = existing.iter().map(|l| l.code.as_str()).collect();

    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate();
        if !taken.contains(code.as_str()) {
            return Ok(code);
        }
    }

    Err(AppError::conflict(
        "Failed to generate unique code",
        json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
    ))
}
