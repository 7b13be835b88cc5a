//! URL helpers for linking generated assets from rendered pages.

/// Compute the URL of `target` relative to the page at `page_url`.
///
/// Both arguments are site-relative URL paths. Following RFC 3986, the last
/// segment of `page_url` names the document, so only the segments before it
/// form the base directory. A trailing slash marks a directory-style URL
/// (`guide/`), whose segments are all part of the base.
///
/// # Examples
///
/// ```
/// use c4docs_views::relative_path;
///
/// assert_eq!(relative_path("index.html", "assets/app.js"), "assets/app.js");
/// assert_eq!(relative_path("guide/", "assets/app.js"), "../assets/app.js");
/// assert_eq!(relative_path("a/b/page.html", "a/c.html"), "../c.html");
/// ```
#[must_use]
pub fn relative_path(page_url: &str, target: &str) -> String {
    let mut base: Vec<&str> = page_url.split('/').filter(|s| !s.is_empty()).collect();
    if !page_url.ends_with('/') {
        base.pop();
    }
    let target: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    let shared = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = "../".repeat(base.len() - shared);
    result.push_str(&target[shared..].join("/"));

    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}
