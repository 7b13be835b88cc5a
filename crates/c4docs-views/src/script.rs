//! Script references for generated web component bundles.

use crate::html::escape_html;
use crate::util::relative_path;

/// Default site-relative directory for generated web component scripts.
pub const ASSETS_DIR: &str = "assets/likec4";

/// Site-relative path of the web component script for a project.
///
/// The default project uses `likec4_views.js`; named projects use
/// `likec4_views_<project>.js` with the project name lowercased. The assets
/// directory is used as given.
///
/// # Examples
///
/// ```
/// use c4docs_views::{ASSETS_DIR, script_path};
///
/// assert_eq!(script_path(ASSETS_DIR, None), "assets/likec4/likec4_views.js");
/// assert_eq!(
///     script_path(ASSETS_DIR, Some("Billing")),
///     "assets/likec4/likec4_views_billing.js"
/// );
/// ```
#[must_use]
pub fn script_path(assets_dir: &str, project: Option<&str>) -> String {
    let assets_dir = assets_dir.trim_end_matches('/');
    match project {
        None => format!("{assets_dir}/likec4_views.js"),
        Some(project) => format!(
            "{assets_dir}/likec4_views_{}.js",
            project.to_lowercase()
        ),
    }
}

/// Script element loading `script_path` from the page at `page_url`.
#[must_use]
pub fn script_tag(page_url: &str, script_path: &str) -> String {
    format!(
        r#"<script src="{}"></script>"#,
        escape_html(&relative_path(page_url, script_path))
    )
}

/// Prepend one script element per path to rendered page HTML.
///
/// Returns `html` unchanged when there are no scripts.
#[must_use]
pub fn prepend_scripts<I, S>(html: &str, page_url: &str, script_paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let scripts: Vec<String> = script_paths
        .into_iter()
        .map(|path| script_tag(page_url, path.as_ref()))
        .collect();
    if scripts.is_empty() {
        return html.to_owned();
    }
    format!("{}\n{html}", scripts.join("\n"))
}
