//! Target URL validation.
//!
//! Target URLs are stored as the admin typed them (trimmed). Validation
//! checks that the value is an absolute web URL with no control characters.

use url::Url;

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Enter URL")]
    Empty,

    #[error("Invalid URL: {0}")]
    InvalidFormat(String),

    #[error("URL must not contain control characters")]
    ControlCharacters,

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates a target URL and returns its trimmed form.
///
/// # Rules
///
/// 1. Must be non-empty after trimming
/// 2. Must not contain control characters (`Url::parse` silently drops tabs
///    and newlines, which would leave the stored value unparsed)
/// 3. Must parse as an absolute URL (relative paths are rejected)
/// 4. Scheme must be `http` or `https`; `javascript:`, `data:`, `file:` etc. are rejected
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target_url(" https://x.test ").unwrap(), "https://x.test");
/// assert!(validate_target_url("/relative").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat(
            "missing host".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}
