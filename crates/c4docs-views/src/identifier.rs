//! Identifier validation for project names and view ids.

/// Check whether `value` is a safe identifier.
///
/// An identifier starts with an ASCII letter, followed by any number of ASCII
/// letters, digits, hyphens, or underscores. Project names must pass this
/// check before they are used as custom element prefixes or file names.
///
/// # Examples
///
/// ```
/// use c4docs_views::is_valid_identifier;
///
/// assert!(is_valid_identifier("my_project-1"));
/// assert!(!is_valid_identifier("123project"));
/// assert!(!is_valid_identifier(""));
/// ```
#[must_use]
pub fn is_valid_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
