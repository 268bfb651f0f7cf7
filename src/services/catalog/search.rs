//! Keyword matching shared by the catalog backends.
//!
//! The relational backend matches with SQLite's `LIKE`, which folds ASCII
//! letters only. The snapshot backend applies the same rule in Rust, and the
//! SQL pattern escapes `LIKE` wildcards, so a keyword always means a literal
//! substring of the item name on both backends.
//!
//! SQLite compares text only up to the first NUL byte, so control characters
//! are rejected in keywords and item names before either backend sees them.

use crate::error::{Error, Result};

/// Escape character used in `LIKE ... ESCAPE '\'` clauses.
pub(crate) const LIKE_ESCAPE: char = '\\';

/// Returns true if `text` contains a control character (NUL included).
pub(crate) fn has_control_chars(text: &str) -> bool {
    text.chars().any(char::is_control)
}

/// Checks that `keyword` is usable by every backend.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `keyword` is empty or contains a
/// control character.
pub(crate) fn validate_keyword(keyword: &str) -> Result<()> {
    if keyword.is_empty() {
        return Err(Error::invalid_argument("Search keyword cannot be empty"));
    }
    if has_control_chars(keyword) {
        return Err(Error::invalid_argument(
            "Search keyword cannot contain control characters",
        ));
    }
    Ok(())
}

/// Returns true if `keyword` occurs in `name`, ignoring ASCII case.
pub(crate) fn name_matches(name: &str, keyword: &str) -> bool {
    name.to_ascii_lowercase()
        .contains(&keyword.to_ascii_lowercase())
}

/// Builds a `LIKE` pattern matching `keyword` as a literal substring.
pub(crate) fn like_pattern(keyword: &str) -> String {
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
