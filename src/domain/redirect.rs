//! Short-code resolution for incoming navigation paths.
//!
//! Resolution is a pure function of `(path, collection)`. The caller decides
//! what to do with the match (redirect and count a click, or render the
//! dashboard).

use crate::domain::entities::Link;
use url::Url;

/// Well-known asset names that are never treated as short codes.
pub const RESERVED_PATHS: &[&str] = &["index.html", "favicon.ico", "robots.txt"];

/// Strips leading and trailing `/` from a navigation path.
pub fn normalize_path(raw: &str) -> &str {
    raw.trim_matches('/')
}

/// Returns true if `path` should never be looked up as a short code.
pub fn is_reserved_path(path: &str) -> bool {
    path.is_empty() || RESERVED_PATHS.contains(&path)
}

/// Finds the record a navigation path redirects to.
///
/// Returns `None` for empty or reserved paths, for paths that match no code,
/// and for matches whose target URL is blank.
pub fn resolve<'a>(raw_path: &str, links: &'a [Link]) -> Option<&'a Link> {
    let path = normalize_path(raw_path);
    if is_reserved_path(path) {
        return None;
    }

    links
        .iter()
        .find(|link| link.code == path)
        .filter(|link| link.has_target())
}

/// Turns a stored target into a value usable as a `Location` header.
///
/// Visible-ASCII targets are used as stored. Anything else (non-ASCII paths
/// or hosts) is re-serialized through [`Url`], which percent-encodes it.
/// Returns `None` when no valid header value can be produced, e.g. for
/// records written before control characters were rejected.
pub fn redirect_location(target: &str) -> Option<String> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    if target.bytes().all(|b| b.is_ascii_graphic()) {
        return Some(target.to_string());
    }
    if target.chars().any(char::is_control) {
        return None;
    }

    let url = Url::parse(target).ok()?;
    let location = String::from(url);
    location
        .bytes()
        .all(|b| b.is_ascii_graphic())
        .then_some(location)
}
