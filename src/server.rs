//! HTTP server initialization and runtime setup.
//!
//! Builds the configured link store, waits for a remote store to come up,
//! and runs the Axum server.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{LocalLinkRepository, RemoteLinkRepository, SeedSource};
use crate::infrastructure::probe::{ProbeProgress, wait_until_ready};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (local JSON file or remote link service)
/// - Readiness probe for the remote store
/// - Axum HTTP server
///
/// A remote store that never becomes ready is logged and the server starts
/// anyway; requests then degrade per route (503 on the API, empty dashboard).
///
/// # Errors
///
/// Returns an error if:
/// - The remote client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config)?;

    if config.store_backend == StoreBackend::Remote {
        probe_store(&repository, &config).await;
    }

    let state = AppState::new(
        repository,
        config.code_length,
        &config.base_url,
        config.admin_secret.as_deref(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}

/// Creates the repository selected by `STORE_BACKEND`.
pub fn build_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.store_backend {
        StoreBackend::Local => {
            tracing::info!(path = %config.store_path, "Using local link store");
            Ok(Arc::new(LocalLinkRepository::new(
                &config.store_path,
                SeedSource::parse(&config.seed_source),
            )))
        }
        StoreBackend::Remote => {
            let url = config
                .remote_api_url
                .as_deref()
                .context("REMOTE_API_URL must be set for the remote store")?;
            tracing::info!(url, "Using remote link store");
            let repo = RemoteLinkRepository::new(url, config.remote_timeout())?;
            Ok(Arc::new(repo))
        }
    }
}

/// Waits for the store to answer, logging progress once per second.
async fn probe_store(repository: &Arc<dyn LinkRepository>, config: &Config) {
    let probe_config = config.probe_config();
    let (tx, mut rx) = watch::channel(ProbeProgress::default());

    let reporter = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let progress = *rx.borrow_and_update();
            if progress.ready {
                break;
            }
            tracing::info!(
                attempts = progress.attempts,
                percent = progress.percent(),
                "Waiting for link store"
            );
        }
    });

    match wait_until_ready(repository, &probe_config, &tx).await {
        Ok(outcome) => tracing::info!(
            attempts = outcome.attempts,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Link store is ready"
        ),
        Err(e) => tracing::error!(error = %e, "Link store unavailable, starting degraded"),
    }

    drop(tx);
    let _ = reporter.await;
}
