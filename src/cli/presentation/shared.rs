//! Shared presentation helpers: placeholders, truncation, JSON rendering.

use crate::error::{ApiError, StorageError};
use serde::Serialize;

/// Shown in table cells for absent values.
pub const PLACEHOLDER: &str = "-";

/// Truncate to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    const MARKER: &str = "...";
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let keep = max_chars.saturating_sub(MARKER.len());
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(MARKER);
    out
}

/// `value` or the placeholder.
pub fn or_placeholder<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(StorageError::Serialize(e.to_string())))
}
