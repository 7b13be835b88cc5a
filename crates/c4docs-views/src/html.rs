//! HTML helpers.

/// Escape text for use inside an HTML attribute value or element body.
///
/// Neutralizes `&`, `<`, `>`, `"` and `'`, so the result can be placed
/// between double or single quotes without closing the attribute.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
