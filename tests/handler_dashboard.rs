mod common;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use axum_test::TestServer;
use std::sync::Arc;
use tinylink::api::handlers::redirect_handler;
use tinylink::infrastructure::persistence::{LocalLinkRepository, SeedSource};
use tinylink::state::AppState;
use tinylink::web::handlers::{
    create_link_form_handler, dashboard_handler, delete_link_form_handler,
};

fn create_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/", get(dashboard_handler))
        .route("/dashboard/links", post(create_link_form_handler))
        .route(
            "/dashboard/links/{code}/delete",
            post(delete_link_form_handler),
        )
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_dashboard_lists_links() {
    let server = create_server(common::create_test_state(&[
        common::sample_link("rust", "Rust Book", "https://doc.rust-lang.org/book/"),
        common::sample_link("tokio", "Tokio Tutorial", "https://tokio.rs/tokio/tutorial"),
    ]));

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Rust Book"));
    assert!(html.contains("Tokio Tutorial"));
    assert!(html.contains("Links (2)"));
}

#[tokio::test]
async fn test_dashboard_title_opens_through_short_route() {
    let server = create_server(common::create_test_state(&[common::sample_link(
        "rust",
        "Rust Book",
        "https://doc.rust-lang.org/book/",
    )]));

    let html = server.get("/").await.text();

    assert!(html.contains(r#"<a class="link-name" href="/rust""#));
    assert!(!html.contains(r#"href="https://doc.rust-lang.org/book/""#));
}

#[tokio::test]
async fn test_opening_dashboard_link_counts_click() {
    let path = common::temp_store_path();
    common::write_links(
        &path,
        &[common::sample_link("rust", "Rust Book", "https://doc.rust-lang.org/book/")],
    );
    let repo = Arc::new(LocalLinkRepository::new(path.clone(), SeedSource::None));
    let app = Router::new()
        .route("/", get(dashboard_handler))
        .route("/{*path}", get(redirect_handler))
        .with_state(AppState::new(repo, 6, common::BASE_URL, None));
    let server = TestServer::new(app).unwrap();

    let html = server.get("/").await.text();
    let href = html
        .split(r#"<a class="link-name" href=""#)
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap()
        .to_string();

    let response = server.get(&href).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://doc.rust-lang.org/book/");
    assert_eq!(common::read_links(&path)[0].total_clicks, 1);
}

#[tokio::test]
async fn test_dashboard_search_filter() {
    let server = create_server(common::create_test_state(&[
        common::sample_link("rust", "Rust Book", "https://doc.rust-lang.org/book/"),
        common::sample_link("tokio", "Tokio Tutorial", "https://tokio.rs/tokio/tutorial"),
    ]));

    let response = server.get("/").add_query_param("q", "rust").await;

    let html = response.text();
    assert!(html.contains("Rust Book"));
    assert!(!html.contains("Tokio Tutorial"));
}

#[tokio::test]
async fn test_dashboard_shows_message() {
    let server = create_server(common::create_test_state(&[]));

    let response = server.get("/").add_query_param("msg", "Created").await;

    let html = response.text();
    assert!(html.contains("Created"));
    assert!(html.contains("No links found"));
}

#[tokio::test]
async fn test_dashboard_store_unavailable() {
    let server = create_server(common::create_unavailable_state());

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("temporarily unavailable"));
}

#[tokio::test]
async fn test_create_form_redirects_with_message() {
    let server = create_server(common::create_test_state(&[]));

    let response = server
        .post("/dashboard/links")
        .form(&[
            ("title", "Docs"),
            ("target_url", "https://docs.rs"),
            ("code", "docs"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/?msg=Created+docs");

    let html = server.get("/").await.text();
    assert!(html.contains("docs"));
}

#[tokio::test]
async fn test_create_form_blank_code_generates_one() {
    let server = create_server(common::create_test_state(&[]));

    let response = server
        .post("/dashboard/links")
        .form(&[
            ("title", "Docs"),
            ("target_url", "https://docs.rs"),
            ("code", ""),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_create_form_validation_rerenders() {
    let server = create_server(common::create_test_state(&[]));

    let response = server
        .post("/dashboard/links")
        .form(&[("title", ""), ("target_url", "https://docs.rs")])
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("Enter title"));
}

#[tokio::test]
async fn test_forms_require_admin_secret_when_configured() {
    let server = create_server(common::create_test_state_with_secret(
        &[common::sample_link("keep", "Keep", "https://keep.test")],
        "s3cret",
    ));

    let response = server
        .post("/dashboard/links/keep/delete")
        .form(&[("admin_secret", "nope")])
        .await;
    response.assert_status_unauthorized();
    assert!(response.text().contains("Wrong secret"));

    let response = server
        .post("/dashboard/links/keep/delete")
        .form(&[("admin_secret", "s3cret")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/?msg=Deleted");
}
