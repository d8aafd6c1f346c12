#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tinylink::domain::entities::Link;
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::{LocalLinkRepository, SeedSource};
use tinylink::state::AppState;
use tinylink::utils::code_generator::generate_code;

pub const BASE_URL: &str = "http://short.test";

/// Unique scratch directory for one test.
pub fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tinylink-test-{}", generate_code(12)));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Unique persisted-store path inside a fresh scratch directory.
pub fn temp_store_path() -> PathBuf {
    temp_dir().join("links.json")
}

pub fn sample_link(code: &str, title: &str, target_url: &str) -> Link {
    Link::new(
        code.to_string(),
        title.to_string(),
        target_url.to_string(),
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
    )
}

pub fn write_links(path: &Path, links: &[Link]) {
    std::fs::write(path, serde_json::to_vec(links).unwrap()).unwrap();
}

pub fn read_links(path: &Path) -> Vec<Link> {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

/// Local repository with no seed, pre-populated with `links`.
pub fn create_test_repository(links: &[Link]) -> Arc<LocalLinkRepository> {
    let path = temp_store_path();
    write_links(&path, links);
    Arc::new(LocalLinkRepository::new(path, SeedSource::None))
}

pub fn create_test_state(links: &[Link]) -> AppState {
    let repo: Arc<dyn LinkRepository> = create_test_repository(links);
    AppState::new(repo, 6, BASE_URL, None)
}

pub fn create_test_state_with_secret(links: &[Link], secret: &str) -> AppState {
    let repo: Arc<dyn LinkRepository> = create_test_repository(links);
    AppState::new(repo, 6, BASE_URL, Some(secret))
}

/// State whose store cannot be read: the store path is a directory.
pub fn create_unavailable_state() -> AppState {
    let repo: Arc<dyn LinkRepository> =
        Arc::new(LocalLinkRepository::new(temp_dir(), SeedSource::None));
    AppState::new(repo, 6, BASE_URL, None)
}
