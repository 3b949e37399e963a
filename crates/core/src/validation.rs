//! Input validation shared by the service operations.
//!
//! Every check returns [`CoreError::Validation`] so callers can reject a
//! request before touching the database.

use crate::error::CoreError;

/// Reject a missing or blank identifier.
pub fn require_id(value: Option<&str>, field: &str) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Use `value` when it has visible content, otherwise `default`.
pub fn or_default_text(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Reject blank required text such as comment content.
pub fn require_text(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Accept `#rgb`, `#rrggbb` and `#rrggbbaa` hex colours.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| {
            matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        });
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Expected a hex value such as #6366f1"
        )))
    }
}

/// Reject negative board positions.
pub fn validate_position(position: i64) -> Result<(), CoreError> {
    if position < 0 {
        return Err(CoreError::Validation(format!(
            "position must be non-negative, got {position}"
        )));
    }
    Ok(())
}
