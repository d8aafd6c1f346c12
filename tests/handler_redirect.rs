mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use std::sync::Arc;
use tinylink::api::handlers::redirect_handler;
use tinylink::infrastructure::persistence::{LocalLinkRepository, SeedSource};
use tinylink::state::AppState;

fn create_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{*path}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "docs",
        "Docs",
        "https://example.com/target",
    )]));

    let response = server.get("/docs").await;

    assert_eq!(response.status_code(), 307);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_ignores_trailing_slash() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "docs",
        "Docs",
        "https://example.com/target",
    )]));

    let response = server.get("/docs/").await;

    assert_eq!(response.status_code(), 307);
}

#[tokio::test]
async fn test_redirect_counts_click() {
    let path = common::temp_store_path();
    common::write_links(
        &path,
        &[common::sample_link("hit", "Hit", "https://hit.test")],
    );
    let repo = Arc::new(LocalLinkRepository::new(path.clone(), SeedSource::None));
    let server = create_server(AppState::new(repo, 6, common::BASE_URL, None));

    server.get("/hit").await;
    server.get("/hit").await;

    let stored = common::read_links(&path);
    assert_eq!(stored[0].total_clicks, 2);
    assert!(stored[0].last_clicked.is_some());
}

#[tokio::test]
async fn test_unknown_code_renders_dashboard() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "docs",
        "Docs Page",
        "https://example.com/target",
    )]));

    let response = server.get("/nope").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("TinyLink"));
    assert!(html.contains("Docs Page"));
}

#[tokio::test]
async fn test_code_match_is_case_sensitive() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "docs",
        "Docs",
        "https://example.com/target",
    )]));

    let response = server.get("/DOCS").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_reserved_path_renders_dashboard() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "index.html",
        "Shadowed",
        "https://example.com/target",
    )]));

    let response = server.get("/index.html").await;

    response.assert_status_ok();
    assert!(response.text().contains("TinyLink"));
}

#[tokio::test]
async fn test_link_without_target_does_not_redirect() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "empty", "Empty", "",
    )]));

    let response = server.get("/empty").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_redirect_encodes_non_ascii_target() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "cafe",
        "Cafe",
        "https://x.test/café",
    )]));

    let response = server.get("/cafe").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://x.test/caf%C3%A9");
}

#[tokio::test]
async fn test_stored_target_with_newline_is_not_redirected_or_counted() {
    let path = common::temp_store_path();
    common::write_links(
        &path,
        &[common::sample_link("nl", "Newline", "https://x.test/a\nb")],
    );
    let repo = Arc::new(LocalLinkRepository::new(path.clone(), SeedSource::None));
    let server = create_server(AppState::new(repo, 6, common::BASE_URL, None));

    let response = server.get("/nl").await;

    response.assert_status_ok();
    assert_eq!(common::read_links(&path)[0].total_clicks, 0);
}

#[tokio::test]
async fn test_store_failure_renders_dashboard() {
    let server = create_server(common::create_unavailable_state());

    let response = server.get("/docs").await;

    response.assert_status_ok();
    assert!(response.text().contains("temporarily unavailable"));
}
