//! Short code generation and validation utilities.
//!
//! Generated codes are random lowercase alphanumerics. They are not meant to
//! be unguessable; uniqueness is enforced by the caller retrying against the
//! current collection.

use crate::domain::redirect::RESERVED_PATHS;
use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Alphabet for generated codes.
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Bounds for user-supplied codes.
const CUSTOM_CODE_MIN: usize = 3;
const CUSTOM_CODE_MAX: usize = 32;

/// Route names that would shadow service endpoints.
const RESERVED_CODES: &[&str] = &["api", "health", "static", "dashboard"];

/// Generates a random `[a-z0-9]` code of `len` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided short code.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved path or route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < CUSTOM_CODE_MIN || code.len() > CUSTOM_CODE_MAX {
        return Err(AppError::bad_request(
            format!("Custom code must be {CUSTOM_CODE_MIN}-{CUSTOM_CODE_MAX} characters"),
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain lowercase letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) || RESERVED_PATHS.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
