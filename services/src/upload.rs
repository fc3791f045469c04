//! Stored names for uploaded images. Only the metadata is kept; the bytes are
//! handled outside this service.

use chrono::{DateTime, Utc};

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub fn is_allowed(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Base name with anything outside `[A-Za-z0-9._-]` replaced by `_`.
pub fn sanitize(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// `{prefix}_{millis}_{name}`, or `None` when the extension is not an image.
pub fn stored_name(prefix: &str, filename: &str, now: DateTime<Utc>) -> Option<String> {
    let name = sanitize(filename);
    if !is_allowed(&name) {
        return None;
    }
    Some(format!("{prefix}_{}_{name}", now.timestamp_millis()))
}
