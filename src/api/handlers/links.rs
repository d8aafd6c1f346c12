//! Handlers for link management endpoints (list, create, delete, click).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, ListLinksQuery};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links, optionally filtered by title.
///
/// # Endpoint
///
/// `GET /api/links?q=<title filter>`
///
/// # Errors
///
/// Returns 503 Service Unavailable if the store cannot be read.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state
        .link_service
        .list_filtered(query.q.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| to_response(&state, link))
            .collect(),
    ))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "title": "Docs", "targetUrl": "https://example.com/docs", "code": "docs" }
/// ```
///
/// `code` is optional and trimmed; a random code is generated when it is
/// omitted or blank.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the code is taken or no unique code could be generated.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(to_response(&state, link)),
    ))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Counts one click on a link without redirecting.
///
/// # Endpoint
///
/// `POST /api/links/{code}/click`
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn click_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.record_click(&code).await?;
    Ok(Json(to_response(&state, link)))
}

fn to_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state.link_service.short_url(&state.base_url, &link.code);
    LinkResponse::from_link(link, short_url)
}
