//! File-backed link repository seeded from a static resource.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::CACHE_CONTROL;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkRepository, ensure_code_free};
use crate::error::AppError;

/// Where the initial collection comes from when nothing is persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// A JSON array on disk.
    File(PathBuf),
    /// A JSON array served over HTTP(S).
    Url(String),
    /// Start empty.
    None,
}

impl SeedSource {
    /// Interprets a configuration value: `http(s)://` means URL, empty means
    /// no seed, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            SeedSource::None
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            SeedSource::Url(raw.to_string())
        } else {
            SeedSource::File(PathBuf::from(raw))
        }
    }
}

/// Link repository persisting the whole collection as one JSON file.
///
/// # Load Behaviour
///
/// 1. Persisted file present and valid: return it
/// 2. Persisted file corrupt or absent: fetch the seed and cache it as the persisted copy
/// 3. Seed missing or unreachable: empty collection (logged)
///
/// An I/O error other than "not found" on the persisted file is returned as
/// [`AppError::Unavailable`].
///
/// Writes go to a sibling temp file that is then renamed over the target.
/// Read-modify-write sequences hold an internal lock, so the duplicate-code
/// check in `insert` and the write cannot interleave with another writer.
pub struct LocalLinkRepository {
    store_path: PathBuf,
    seed: SeedSource,
    http: reqwest::Client,
    lock: Mutex<()>,
}

impl LocalLinkRepository {
    /// Creates a repository persisting to `store_path`.
    pub fn new(store_path: impl Into<PathBuf>, seed: SeedSource) -> Self {
        Self {
            store_path: store_path.into(),
            seed,
            http: reqwest::Client::new(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the persisted collection.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    async fn read_persisted(&self) -> Result<Option<Vec<Link>>, AppError> {
        let bytes = match tokio::fs::read(&self.store_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(links) => Ok(Some(links)),
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.store_path.display(),
                    "Persisted links are corrupt, reseeding"
                );
                Ok(None)
            }
        }
    }

    async fn fetch_seed(&self) -> Result<Vec<Link>, AppError> {
        match &self.seed {
            SeedSource::None => Ok(Vec::new()),
            SeedSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            SeedSource::Url(url) => {
                let links = self
                    .http
                    .get(url)
                    .header(CACHE_CONTROL, "no-cache")
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<Vec<Link>>()
                    .await?;
                Ok(links)
            }
        }
    }

    async fn load_unlocked(&self) -> Result<Vec<Link>, AppError> {
        if let Some(links) = self.read_persisted().await? {
            return Ok(links);
        }

        match self.fetch_seed().await {
            Ok(seed) => {
                debug!(count = seed.len(), "Seeding link store");
                if let Err(e) = self.write_unlocked(&seed).await {
                    warn!(error = %e, "Failed to cache seed links");
                }
                Ok(seed)
            }
            Err(e) => {
                warn!(error = %e, seed = ?self.seed, "Seed unavailable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_unlocked(&self, links: &[Link]) -> Result<(), AppError> {
        if let Some(parent) = self.store_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(links)?;
        let tmp = self.store_path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.store_path).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for LocalLinkRepository {
    async fn load(&self) -> Result<Vec<Link>, AppError> {
        let _guard = self.lock.lock().await;
        self.load_unlocked().await
    }

    async fn save(&self, links: &[Link]) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        self.write_unlocked(links).await
    }

    async fn insert(&self, link: Link) -> Result<Link, AppError> {
        let _guard = self.lock.lock().await;
        let mut links = self.load_unlocked().await?;
        ensure_code_free(&links, &link.code)?;
        links.insert(0, link.clone());
        self.write_unlocked(&links).await?;
        Ok(link)
    }

    async fn remove(&self, code: &str) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;
        let mut links = self.load_unlocked().await?;
        let before = links.len();
        links.retain(|l| l.code != code);
        if links.len() == before {
            return Ok(false);
        }
        self.write_unlocked(&links).await?;
        Ok(true)
    }

    async fn record_click(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        let _guard = self.lock.lock().await;
        let mut links = self.load_unlocked().await?;
        let Some(link) = links.iter_mut().find(|l| l.code == code) else {
            return Ok(None);
        };
        link.register_click(now);
        let updated = link.clone();
        self.write_unlocked(&links).await?;
        Ok(Some(updated))
    }

    async fn is_ready(&self) -> bool {
        self.load().await.is_ok()
    }
}
