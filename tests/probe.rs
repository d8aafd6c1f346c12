use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tinylink::error::AppError;
use tinylink::infrastructure::probe::{
    ProbeConfig, ProbeProgress, ReadinessCheck, wait_until_ready,
};
use tokio::sync::watch;

/// Reports ready from the `ready_on`-th call onwards.
struct ScriptedCheck {
    calls: AtomicUsize,
    ready_on: usize,
}

impl ScriptedCheck {
    fn new(ready_on: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            ready_on,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessCheck for ScriptedCheck {
    async fn check(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.ready_on
    }
}

#[tokio::test(start_paused = true)]
async fn test_ready_on_first_attempt() {
    let check = ScriptedCheck::new(1);
    let (tx, rx) = watch::channel(ProbeProgress::default());

    let outcome = wait_until_ready(&check, &ProbeConfig::default(), &tx)
        .await
        .unwrap();

    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.elapsed, Duration::ZERO);
    assert!(rx.borrow().ready);
}

#[tokio::test(start_paused = true)]
async fn test_ready_after_backoff() {
    let check = ScriptedCheck::new(3);
    let (tx, rx) = watch::channel(ProbeProgress::default());

    let outcome = wait_until_ready(&check, &ProbeConfig::default(), &tx)
        .await
        .unwrap();

    assert_eq!(outcome.attempts, 3);
    assert_eq!(check.calls(), 3);
    // 3s then 6s between attempts.
    assert!(outcome.elapsed >= Duration::from_secs(9));
    assert!(outcome.elapsed < Duration::from_secs(10));

    let progress = *rx.borrow();
    assert!(progress.ready);
    assert_eq!(progress.attempts, 3);
    assert_eq!(progress.elapsed_secs, 9);
    assert_eq!(progress.percent(), 45);
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_after_max_attempts() {
    let check = ScriptedCheck::new(usize::MAX);
    let (tx, rx) = watch::channel(ProbeProgress::default());

    let err = wait_until_ready(&check, &ProbeConfig::default(), &tx)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unavailable { .. }));
    assert_eq!(check.calls(), 10);

    let progress = *rx.borrow();
    assert!(!progress.ready);
    assert_eq!(progress.attempts, 10);
    assert_eq!(progress.elapsed_secs, 20);
    assert_eq!(progress.percent(), 100);
}

#[tokio::test(start_paused = true)]
async fn test_progress_ticks_while_waiting() {
    let check = ScriptedCheck::new(2);
    let (tx, mut rx) = watch::channel(ProbeProgress::default());

    let probe = tokio::spawn(async move {
        wait_until_ready(&check, &ProbeConfig::default(), &tx).await
    });

    let mut seen = Vec::new();
    while rx.changed().await.is_ok() {
        let progress = *rx.borrow_and_update();
        seen.push(progress.elapsed_secs);
        if progress.ready {
            break;
        }
    }

    probe.await.unwrap().unwrap();
    assert!(seen.contains(&1));
    assert!(seen.contains(&2));
    assert_eq!(seen.last(), Some(&3));
}

#[tokio::test(start_paused = true)]
async fn test_single_attempt_fails_fast() {
    let check = ScriptedCheck::new(2);
    let (tx, _rx) = watch::channel(ProbeProgress::default());
    let config = ProbeConfig {
        max_attempts: 1,
        ..ProbeConfig::default()
    };

    let result = wait_until_ready(&check, &config, &tx).await;

    assert!(result.is_err());
    assert_eq!(check.calls(), 1);
}
