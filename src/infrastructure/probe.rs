//! Startup readiness probe for the link store backend.
//!
//! Polls the backend with capped exponential backoff until it answers or the
//! attempt budget runs out. While waiting, a progress value keyed to elapsed
//! wall-clock time (capped at a ceiling) is published on a `watch` channel.
//!
//! Both timers (the progress ticker and the retry delay) live inside the
//! probe future, so they are released together whether the probe succeeds,
//! gives up, or the caller drops the future.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_retry::strategy::ExponentialBackoff;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Something that can report whether it is ready to serve.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn check(&self) -> bool;
}

#[async_trait]
impl ReadinessCheck for Arc<dyn LinkRepository> {
    async fn check(&self) -> bool {
        self.is_ready().await
    }
}

/// Probe timing parameters.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Delay after the first failed attempt.
    pub initial_interval: Duration,
    /// Upper bound for the backoff delay.
    pub max_interval: Duration,
    /// Attempts before giving up (at least 1).
    pub max_attempts: usize,
    /// Elapsed time at which progress reads 100%.
    pub progress_ceiling: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(3),
            max_interval: Duration::from_secs(30),
            max_attempts: 10,
            progress_ceiling: Duration::from_secs(20),
        }
    }
}

impl ProbeConfig {
    /// Backoff delays between attempts: initial, 2x, 4x, ... capped at `max_interval`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let initial_ms = self.initial_interval.as_millis().max(1) as u64;
        let factor = initial_ms.div_ceil(2).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(self.max_interval)
            .take(self.max_attempts.saturating_sub(1))
    }
}

/// Progress snapshot published while waiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeProgress {
    /// Whole seconds elapsed, capped at `ceiling_secs`.
    pub elapsed_secs: u64,
    pub ceiling_secs: u64,
    /// Attempts made so far.
    pub attempts: usize,
    pub ready: bool,
}

impl ProbeProgress {
    /// Elapsed time as a percentage of the ceiling (0-100).
    pub fn percent(&self) -> u8 {
        if self.ceiling_secs == 0 {
            return 100;
        }
        ((self.elapsed_secs.min(self.ceiling_secs) * 100) / self.ceiling_secs) as u8
    }
}

/// Result of a successful probe.
#[derive(Debug, Clone, Copy)]
pub struct ProbeOutcome {
    pub attempts: usize,
    pub elapsed: Duration,
}

/// Polls `target` until it reports ready.
///
/// # Errors
///
/// Returns [`AppError::Unavailable`] after `max_attempts` failed checks.
pub async fn wait_until_ready(
    target: &dyn ReadinessCheck,
    config: &ProbeConfig,
    progress: &watch::Sender<ProbeProgress>,
) -> Result<ProbeOutcome, AppError> {
    let started = Instant::now();
    let ceiling_secs = config.progress_ceiling.as_secs();
    let mut delays = config.delays();
    let mut attempts = 0usize;

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let publish = |attempts: usize, ready: bool| {
        let elapsed_secs = started.elapsed().as_secs().min(ceiling_secs);
        progress.send_replace(ProbeProgress {
            elapsed_secs,
            ceiling_secs,
            attempts,
            ready,
        });
    };

    loop {
        attempts += 1;
        if target.check().await {
            publish(attempts, true);
            return Ok(ProbeOutcome {
                attempts,
                elapsed: started.elapsed(),
            });
        }
        publish(attempts, false);

        let Some(delay) = delays.next() else {
            return Err(AppError::unavailable(
                "Link store did not become ready",
                json!({ "attempts": attempts, "elapsed_ms": started.elapsed().as_millis() as u64 }),
            ));
        };

        let retry = tokio::time::sleep(delay);
        tokio::pin!(retry);

        loop {
            tokio::select! {
                _ = &mut retry => break,
                _ = ticker.tick() => publish(attempts, false),
            }
        }
    }
}
