//! Task search helpers.

use crate::error::CoreError;

/// Maximum number of tasks returned by a title search.
pub const SEARCH_LIMIT: i64 = 20;

/// Escape character used in the `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Build a substring `LIKE` pattern, escaping the wildcard characters so the
/// keyword is matched literally.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Trim a search keyword and reject an empty one.
pub fn normalize_keyword(keyword: &str) -> Result<&str, CoreError> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Search query must not be empty".into()));
    }
    Ok(trimmed)
}
