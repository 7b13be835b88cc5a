//! HTML page template for static site generation.

use std::fmt::Write;

use c4docs_views::escape_html;

/// Render a complete static HTML page around rendered markdown content.
pub(crate) fn render_page(title: &str, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + 256);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    html.push_str("</head>\n<body>\n<main>\n");
    html.push_str(content);
    if !content.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</main>\n</body>\n</html>\n");

    html
}
