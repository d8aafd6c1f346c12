//! Form handlers for creating and deleting links from the dashboard.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::domain::entities::NewLink;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::dashboard::{DashboardQuery, render_dashboard};

/// Create form fields.
#[derive(Debug, Deserialize)]
pub struct CreateLinkForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub target_url: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub admin_secret: Option<String>,
}

/// Delete form fields.
#[derive(Debug, Deserialize)]
pub struct DeleteLinkForm {
    #[serde(default)]
    pub admin_secret: Option<String>,
}

/// Creates a link from the dashboard form.
///
/// # Endpoint
///
/// `POST /dashboard/links`
///
/// On success redirects to `/?msg=Created`. Validation and store errors
/// re-render the dashboard with the message; nothing is changed.
pub async fn create_link_form_handler(
    State(state): State<AppState>,
    Form(form): Form<CreateLinkForm>,
) -> Response {
    if let Err(e) = check_admin_secret(&state, form.admin_secret.as_deref()) {
        return render_error(&state, e).await;
    }

    let new_link = NewLink {
        title: form.title,
        target_url: form.target_url,
        code: form.code,
    };

    match state.link_service.create(new_link).await {
        Ok(link) => redirect_with_message(&format!("Created {}", link.code)),
        Err(e) => render_error(&state, e).await,
    }
}

/// Deletes a link from the dashboard.
///
/// # Endpoint
///
/// `POST /dashboard/links/{code}/delete`
pub async fn delete_link_form_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Form(form): Form<DeleteLinkForm>,
) -> Response {
    if let Err(e) = check_admin_secret(&state, form.admin_secret.as_deref()) {
        return render_error(&state, e).await;
    }

    match state.link_service.delete(&code).await {
        Ok(()) => redirect_with_message("Deleted"),
        Err(e) => render_error(&state, e).await,
    }
}

fn check_admin_secret(state: &AppState, provided: Option<&str>) -> Result<(), AppError> {
    match state.admin_secret.as_deref() {
        Some(secret) if provided != Some(secret) => Err(AppError::unauthorized(
            "Wrong secret",
            serde_json::json!({}),
        )),
        _ => Ok(()),
    }
}

fn redirect_with_message(message: &str) -> Response {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("/?msg={encoded}")).into_response()
}

async fn render_error(state: &AppState, error: AppError) -> Response {
    let (status, _) = error.status_and_code();
    let message = if error.is_unavailable() {
        "Something went wrong. Please try again.".to_string()
    } else {
        error.to_string()
    };

    let page = render_dashboard(
        state,
        DashboardQuery {
            q: None,
            msg: Some(message),
        },
    )
    .await;

    let status = if status.is_server_error() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        status
    };

    (status, page).into_response()
}
