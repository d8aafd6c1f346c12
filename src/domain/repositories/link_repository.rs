//! Repository trait for link-collection storage.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

/// Storage backend for the link collection.
///
/// The collection is small and is read and written whole. `load` and `save`
/// are the required primitives. The per-record operations default to
/// load → mutate → save; backends with native per-record endpoints override
/// them.
///
/// Failures are returned, never swallowed: an empty collection is
/// `Ok(vec![])`, a failed read is [`AppError::Unavailable`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::LocalLinkRepository`] - JSON file seeded from a static resource
/// - [`crate::infrastructure::persistence::RemoteLinkRepository`] - remote REST link service
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns the current collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the backend cannot be read.
    async fn load(&self) -> Result<Vec<Link>, AppError>;

    /// Replaces the persisted collection. Last writer wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the backend cannot be written.
    async fn save(&self, links: &[Link]) -> Result<(), AppError>;

    /// Adds a record at the front of the collection and persists it.
    ///
    /// Returns the record as stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record with the same code already
    /// exists. Backends that can interleave writers must make this check and
    /// the write one step.
    async fn insert(&self, link: Link) -> Result<Link, AppError> {
        let mut links = self.load().await?;
        ensure_code_free(&links, &link.code)?;
        links.insert(0, link.clone());
        self.save(&links).await?;
        Ok(link)
    }

    /// Removes the record with `code`.
    ///
    /// Returns `Ok(false)` if no such record exists; nothing is written then.
    async fn remove(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.load().await?;
        let before = links.len();
        links.retain(|l| l.code != code);
        if links.len() == before {
            return Ok(false);
        }
        self.save(&links).await?;
        Ok(true)
    }

    /// Counts one click on `code` at `now`.
    ///
    /// Returns the updated record, or `Ok(None)` if no such record exists.
    async fn record_click(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        let mut links = self.load().await?;
        let Some(link) = links.iter_mut().find(|l| l.code == code) else {
            return Ok(None);
        };
        link.register_click(now);
        let updated = link.clone();
        self.save(&links).await?;
        Ok(Some(updated))
    }

    /// Returns true if the backend is reachable.
    async fn is_ready(&self) -> bool {
        self.load().await.is_ok()
    }
}

/// Fails with [`AppError::Conflict`] if `code` is already in `links`.
pub fn ensure_code_free(links: &[Link], code: &str) -> Result<(), AppError> {
    if links.iter().any(|l| l.code == code) {
        return Err(AppError::conflict(
            "Short code already exists",
            json!({ "code": code }),
        ));
    }
    Ok(())
}
