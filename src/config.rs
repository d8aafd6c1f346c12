//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Storage Backends
//!
//! ### Local (default)
//!
//! ```bash
//! export STORE_BACKEND="local"
//! export STORE_PATH="data/tinylink_links_v1.json"
//! export SEED_SOURCE="static/links.json"     # or an http(s):// URL, or empty
//! ```
//!
//! ### Remote link service
//!
//! ```bash
//! export STORE_BACKEND="remote"
//! export REMOTE_API_URL="https://links.example.com/api"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public URL used for copyable short links (default: `http://localhost:3000`)
//! - `CODE_LENGTH` - Generated code length (default: 6, range 4-16)
//! - `ADMIN_SECRET` - Bearer secret required by mutating API routes (unset = open)
//! - `REMOTE_TIMEOUT_SECONDS` - Link service request timeout (default: 10)
//! - `PROBE_INTERVAL_SECONDS` / `PROBE_MAX_INTERVAL_SECONDS` / `PROBE_MAX_ATTEMPTS` /
//!   `PROBE_PROGRESS_CEILING_SECONDS` - Startup readiness probe (defaults: 3 / 30 / 10 / 20)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::probe::ProbeConfig;
use crate::utils::code_generator::DEFAULT_CODE_LENGTH;

/// Which link repository backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Local,
    Remote,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(StoreBackend::Local),
            "remote" => Ok(StoreBackend::Remote),
            other => anyhow::bail!("STORE_BACKEND must be 'local' or 'remote', got '{other}'"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Public base URL without trailing slash.
    pub base_url: String,
    pub store_backend: StoreBackend,
    /// Persisted collection file (local backend).
    pub store_path: String,
    /// Seed file path or URL (local backend). Empty = no seed.
    pub seed_source: String,
    /// Link service base URL (remote backend).
    pub remote_api_url: Option<String>,
    pub remote_timeout_seconds: u64,
    pub code_length: usize,
    /// Shared bearer secret for mutating API routes. Not a security boundary.
    pub admin_secret: Option<String>,
    pub log_level: String,
    pub log_format: String,

    // ── Readiness probe ─────────────────────────────────────────────────────
    pub probe_interval_seconds: u64,
    pub probe_max_interval_seconds: u64,
    pub probe_max_attempts: usize,
    pub probe_progress_ceiling_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_BACKEND` is not recognised.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let store_backend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<StoreBackend>()
            .context("Failed to load store configuration")?;

        let store_path =
            env::var("STORE_PATH").unwrap_or_else(|_| "data/tinylink_links_v1.json".to_string());
        let seed_source = env::var("SEED_SOURCE").unwrap_or_else(|_| "static/links.json".to_string());
        let remote_api_url = env::var("REMOTE_API_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let admin_secret = env::var("ADMIN_SECRET").ok().filter(|v| !v.is_empty());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            base_url,
            store_backend,
            store_path,
            seed_source,
            remote_api_url,
            remote_timeout_seconds: parse_or("REMOTE_TIMEOUT_SECONDS", 10),
            code_length: parse_or("CODE_LENGTH", DEFAULT_CODE_LENGTH),
            admin_secret,
            log_level,
            log_format,
            probe_interval_seconds: parse_or("PROBE_INTERVAL_SECONDS", 3),
            probe_max_interval_seconds: parse_or("PROBE_MAX_INTERVAL_SECONDS", 30),
            probe_max_attempts: parse_or("PROBE_MAX_ATTEMPTS", 10),
            probe_progress_ceiling_seconds: parse_or("PROBE_PROGRESS_CEILING_SECONDS", 20),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - the remote backend is selected without a valid `REMOTE_API_URL`
    /// - `code_length` is outside 4-16
    /// - any timeout or probe setting is zero, or max interval < interval
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.store_backend == StoreBackend::Remote {
            let Some(ref url) = self.remote_api_url else {
                anyhow::bail!("REMOTE_API_URL must be set when STORE_BACKEND is 'remote'");
            };
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!(
                    "REMOTE_API_URL must start with 'http://' or 'https://', got '{}'",
                    url
                );
            }
        }

        if self.store_backend == StoreBackend::Local && self.store_path.trim().is_empty() {
            anyhow::bail!("STORE_PATH must not be empty");
        }

        if !(4..=16).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between 4 and 16, got {}",
                self.code_length
            );
        }

        if self.remote_timeout_seconds == 0 {
            anyhow::bail!("REMOTE_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.probe_interval_seconds == 0 {
            anyhow::bail!("PROBE_INTERVAL_SECONDS must be greater than 0");
        }
        if self.probe_max_interval_seconds < self.probe_interval_seconds {
            anyhow::bail!(
                "PROBE_MAX_INTERVAL_SECONDS ({}) must be >= PROBE_INTERVAL_SECONDS ({})",
                self.probe_max_interval_seconds,
                self.probe_interval_seconds
            );
        }
        if self.probe_max_attempts == 0 {
            anyhow::bail!("PROBE_MAX_ATTEMPTS must be at least 1");
        }
        if self.probe_progress_ceiling_seconds == 0 {
            anyhow::bail!("PROBE_PROGRESS_CEILING_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Request timeout for the remote link service.
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_seconds)
    }

    /// Readiness probe parameters.
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            initial_interval: Duration::from_secs(self.probe_interval_seconds),
            max_interval: Duration::from_secs(self.probe_max_interval_seconds),
            max_attempts: self.probe_max_attempts,
            progress_ceiling: Duration::from_secs(self.probe_progress_ceiling_seconds),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        match self.store_backend {
            StoreBackend::Local => {
                tracing::info!("  Store: local ({})", self.store_path);
                tracing::info!("  Seed: {}", display_or_none(&self.seed_source));
            }
            StoreBackend::Remote => tracing::info!(
                "  Store: remote ({})",
                self.remote_api_url.as_deref().unwrap_or("-")
            ),
        }
        tracing::info!(
            "  Admin secret: {}",
            if self.admin_secret.is_some() { "***" } else { "disabled" }
        );
        tracing::info!("  Code length: {}", self.code_length);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn display_or_none(value: &str) -> &str {
    if value.trim().is_empty() { "none" } else { value }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
