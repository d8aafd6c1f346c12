//! Redirect resolution on top of the link store.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::redirect::{is_reserved_path, normalize_path, redirect_location, resolve};

/// Resolves navigation paths to target URLs and counts the click.
///
/// Lookup failures never surface: the caller falls through to rendering the
/// dashboard.
pub struct RedirectService {
    link_service: Arc<LinkService>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }

    /// Returns the target URL for `raw_path`, if any record matches.
    ///
    /// Empty and reserved paths return `None` without touching the store.
    /// Store errors and targets that cannot form a `Location` header are
    /// logged and treated as "no match".
    pub async fn lookup(&self, raw_path: &str) -> Option<String> {
        let path = normalize_path(raw_path);
        if is_reserved_path(path) {
            return None;
        }

        match self.link_service.list().await {
            Ok(links) => {
                let link = resolve(path, &links)?;
                let location = redirect_location(&link.target_url);
                if location.is_none() {
                    tracing::warn!(code = %link.code, "Target URL cannot be used as a redirect");
                }
                location
            }
            Err(e) => {
                tracing::warn!(error = %e, path, "Redirect lookup failed, falling through");
                None
            }
        }
    }

    /// Resolves `raw_path` and records a click on the matched code.
    ///
    /// A failure to record the click is logged and does not cancel the
    /// redirect.
    pub async fn apply(&self, raw_path: &str) -> Option<String> {
        let target = self.lookup(raw_path).await;
        let code = normalize_path(raw_path);

        match &target {
            Some(_) => {
                metrics::counter!("tinylink_redirects_total").increment(1);
                if let Err(e) = self.link_service.record_click(code).await {
                    tracing::warn!(error = %e, code, "Failed to record click");
                }
            }
            None => metrics::counter!("tinylink_redirect_misses_total").increment(1),
        }

        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use chrono::Utc;
    use serde_json::json;

    fn collection() -> Vec<Link> {
        vec![Link::new(
            "abc123".to_string(),
            "X".to_string(),
            "https://x.test".to_string(),
            Utc::now(),
        )]
    }

    fn redirect_service(mock: MockLinkRepository) -> RedirectService {
        RedirectService::new(Arc::new(LinkService::new(Arc::new(mock), 6)))
    }

    #[tokio::test]
    async fn test_apply_redirects_and_counts_click() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_load().times(1).returning(|| Ok(collection()));
        mock_repo
            .expect_record_click()
            .withf(|code, _| code == "abc123")
            .times(1)
            .returning(|_, _| Ok(None));

        let target = redirect_service(mock_repo).apply("/abc123").await;
        assert_eq!(target.as_deref(), Some("https://x.test"));
    }

    #[tokio::test]
    async fn test_reserved_path_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_load().times(0);
        mock_repo.expect_record_click().times(0);

        let svc = redirect_service(mock_repo);
        assert!(svc.apply("").await.is_none());
        assert!(svc.apply("/index.html").await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_code_falls_through() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_load().times(1).returning(|| Ok(collection()));
        mock_repo.expect_record_click().times(0);

        assert!(redirect_service(mock_repo).apply("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_store_failure_falls_through() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_load()
            .times(1)
            .returning(|| Err(AppError::unavailable("down", json!({}))));

        assert!(redirect_service(mock_repo).apply("abc123").await.is_none());
    }

    #[tokio::test]
    async fn test_unredirectable_target_is_not_counted() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_load().times(1).returning(|| {
            Ok(vec![Link::new(
                "nl1".to_string(),
                "Broken".to_string(),
                "https://x.test/a\nb".to_string(),
                Utc::now(),
            )])
        });
        mock_repo.expect_record_click().times(0);

        assert!(redirect_service(mock_repo).apply("nl1").await.is_none());
    }

    #[tokio::test]
    async fn test_click_failure_still_redirects() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_load().times(1).returning(|| Ok(collection()));
        mock_repo
            .expect_record_click()
            .times(1)
            .returning(|_, _| Err(AppError::unavailable("disk full", json!({}))));

        let target = redirect_service(mock_repo).apply("abc123").await;
        assert_eq!(target.as_deref(), Some("https://x.test"));
    }
}
