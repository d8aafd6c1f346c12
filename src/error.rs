//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the crate returns [`AppError`]. Handlers return
//! it directly; axum turns it into a JSON error envelope:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": { "code": "abc123" } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Error taxonomy shared by the store, services, and HTTP layer.
///
/// - `Validation` - bad input; nothing was changed
/// - `Unauthorized` - admin secret missing or wrong
/// - `NotFound` - no record with the given code
/// - `Conflict` - code already taken or collision retries exhausted
/// - `Unavailable` - storage or remote service failure
/// - `Internal` - anything else
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Unavailable { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status and stable error code for this variant.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Unavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            }
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Returns true for storage and network failures.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AppError::Unavailable { .. })
    }

    /// Builds the JSON error payload without consuming the error.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Unavailable { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::unavailable(
            "Link service request failed",
            json!({ "reason": e.to_string() }),
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::unavailable("Link storage I/O failed", json!({ "reason": e.to_string() }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::internal(
            "Link data could not be (de)serialized",
            json!({ "reason": e.to_string() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("x", json!({})), 400, "validation_error"),
            (AppError::unauthorized("x", json!({})), 401, "unauthorized"),
            (AppError::not_found("x", json!({})), 404, "not_found"),
            (AppError::conflict("x", json!({})), 409, "conflict"),
            (AppError::unavailable("x", json!({})), 503, "service_unavailable"),
            (AppError::internal("x", json!({})), 500, "internal_error"),
        ];

        for (err, status, code) in cases {
            let (s, c) = err.status_and_code();
            assert_eq!(s.as_u16(), status);
            assert_eq!(c, code);
        }
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Short link not found", json!({ "code": "abc" }));
        assert_eq!(err.to_string(), "Short link not found");
    }

    #[test]
    fn test_error_info_keeps_details() {
        let err = AppError::conflict("taken", json!({ "code": "abc" }));
        let info = err.to_error_info();
        assert_eq!(info.code, "conflict");
        assert_eq!(info.details["code"], "abc");
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_unauthorized_sets_www_authenticate() {
        let response = AppError::unauthorized("nope", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["www-authenticate"], "Bearer");
    }
}
