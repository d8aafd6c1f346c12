//! Admin secret middleware for mutating API routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Requires `Authorization: Bearer <ADMIN_SECRET>` when a secret is configured.
///
/// With no secret configured every request passes. The secret is a shared
/// string compared in process; it keeps casual visitors away from
/// create/delete and is not an access-control boundary.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if the header
/// is missing, malformed, or carries the wrong secret.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/links", post(create_link_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(secret) = st.admin_secret.as_deref() else {
        return Ok(next.run(req).await);
    };

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    if token != secret {
        return Err(AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Wrong admin secret"}),
        ));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}
