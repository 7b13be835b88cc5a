//! Static site builder driving a [`BuildSession`] over a markdown tree.

use std::fs;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::generator::WebComponentGenerator;
use crate::session::{BuildSession, GenerationReport, PageRef};
use crate::template::render_page;

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary of a finished build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of pages written.
    pub pages: usize,
    /// Web component generation outcome.
    pub generation: GenerationReport,
}

/// Builds a static HTML site from the markdown files of a docs directory.
#[derive(Debug)]
pub struct SiteBuilder {
    session: BuildSession,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(session: BuildSession) -> Self {
        Self { session }
    }

    /// Render every markdown page into `site_dir`, then generate the web
    /// components the pages use.
    ///
    /// Pages that cannot be read are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the docs directory does not exist or an output
    /// file cannot be written.
    pub fn build(
        mut self,
        site_dir: &Path,
        generator: &dyn WebComponentGenerator,
    ) -> Result<BuildReport, BuildError> {
        let docs_dir = self.session.docs_dir().to_path_buf();
        if !docs_dir.is_dir() {
            return Err(BuildError::SourceNotFound(docs_dir));
        }

        let mut pages = 0;
        for src_uri in collect_pages(&docs_dir) {
            let markdown = match fs::read_to_string(docs_dir.join(&src_uri)) {
                Ok(markdown) => markdown,
                Err(e) => {
                    tracing::warn!(page = %src_uri, error = %e, "Failed to read page");
                    continue;
                }
            };

            let url = page_url(&src_uri);
            let page = PageRef::new(src_uri, url);
            let mut elements = Vec::new();
            let markdown = self.session.rewrite_page(&page, &markdown, |element| {
                elements.push(element);
                placeholder(elements.len() - 1)
            });
            let (title, content) = render_markdown(&markdown);
            let content = restore_elements(content, &elements);
            let content = self.session.on_page_content(&page, &content);
            let title = title.unwrap_or_else(|| fallback_title(&page.src_uri));

            let output = site_dir.join(&page.url);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, render_page(&title, &content))?;
            tracing::debug!(page = %page.src_uri, output = %output.display(), "Wrote page");
            pages += 1;
        }

        tracing::info!(pages, site_dir = %site_dir.display(), "Rendered pages");
        let generation = self.session.on_post_build(site_dir, generator);

        Ok(BuildReport { pages, generation })
    }
}

/// Site-relative URL of the page rendered from `src_uri`.
///
/// ```
/// assert_eq!(c4docs_build::page_url("guide/index.md"), "guide/index.html");
/// ```
#[must_use]
pub fn page_url(src_uri: &str) -> String {
    match src_uri.strip_suffix(".md") {
        Some(stem) => format!("{stem}.html"),
        None => src_uri.to_owned(),
    }
}

/// Markdown files under `docs_dir` as `/`-separated relative paths, sorted.
fn collect_pages(docs_dir: &Path) -> Vec<String> {
    let walker = WalkBuilder::new(docs_dir)
        .standard_filters(false)
        .hidden(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut pages = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read docs entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file())
            || path.extension().is_none_or(|ext| ext != "md")
        {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(docs_dir) {
            pages.push(to_uri(relative));
        }
    }
    pages
}

fn to_uri(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// HTML comment standing in for the `index`th view element of a page.
///
/// Element names such as `my_proj-view` are not valid CommonMark HTML, so the
/// markdown renderer would escape them. Comments pass through untouched.
fn placeholder(index: usize) -> String {
    format!("<!-- c4docs-view:{index} -->")
}

fn restore_elements(mut html: String, elements: &[String]) -> String {
    for (index, element) in elements.iter().enumerate() {
        html = html.replacen(&placeholder(index), element, 1);
    }
    html
}

/// Render markdown to HTML, returning the text of the first level 1 heading.
fn render_markdown(markdown: &str) -> (Option<String>, String) {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, options).collect();

    let mut title: Option<String> = None;
    let mut in_title = false;
    for event in &events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if title.is_none() => {
                in_title = true;
                title = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_title => break,
            Event::Text(text) | Event::Code(text) if in_title => {
                if let Some(title) = title.as_mut() {
                    title.push_str(text);
                }
            }
            _ => {}
        }
    }

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events.into_iter());
    (title.filter(|t| !t.trim().is_empty()), output)
}

fn fallback_title(src_uri: &str) -> String {
    Path::new(src_uri)
        .file_stem()
        .map_or_else(|| src_uri.to_owned(), |stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_url() {
        assert_eq!(page_url("index.md"), "index.html");
        assert_eq!(page_url("guide/setup.md"), "guide/setup.html");
        assert_eq!(page_url("notes.txt"), "notes.txt");
    }

    #[test]
    fn test_render_markdown_extracts_title() {
        let (title, html) = render_markdown("# Hello `world`\n\nBody text.\n\n# Second\n");

        assert_eq!(title.as_deref(), Some("Hello world"));
        assert!(html.contains("<h1>Hello <code>world</code></h1>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn test_render_markdown_without_heading() {
        let (title, _) = render_markdown("## Only h2\n");

        assert_eq!(title, None);
    }

    #[test]
    fn test_render_markdown_keeps_raw_html() {
        let (_, html) = render_markdown(
            "<likec4-view view-id=\"v\" browser=\"true\" dynamic-variant=\"diagram\"></likec4-view>\n",
        );

        assert!(html.contains(
            "<likec4-view view-id=\"v\" browser=\"true\" dynamic-variant=\"diagram\"></likec4-view>"
        ));
    }

    #[test]
    fn test_elements_survive_markdown_rendering() {
        let elements = vec![
            r#"<my_proj-view view-id="a" browser="true" dynamic-variant="diagram"></my_proj-view>"#
                .to_owned(),
            r#"<likec4-view view-id="b" browser="true" dynamic-variant="diagram"></likec4-view>"#
                .to_owned(),
        ];
        let markdown = format!(
            "# Title\n\n{}\n\nText with {} inline.\n",
            placeholder(0),
            placeholder(1)
        );

        let (_, html) = render_markdown(&markdown);
        let html = restore_elements(html, &elements);

        assert!(html.contains(&elements[0]));
        assert!(html.contains(&elements[1]));
        assert!(!html.contains("&lt;"));
        assert!(!html.contains("c4docs-view:"));
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(fallback_title("guide/setup.md"), "setup");
    }

    #[test]
    fn test_collect_pages_sorted_and_filtered() {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path();
        fs::create_dir_all(docs.join("b")).unwrap();
        fs::create_dir_all(docs.join(".hidden")).unwrap();
        fs::write(docs.join("z.md"), "").unwrap();
        fs::write(docs.join("a.md"), "").unwrap();
        fs::write(docs.join("b/c.md"), "").unwrap();
        fs::write(docs.join("b/image.png"), "").unwrap();
        fs::write(docs.join(".hidden/secret.md"), "").unwrap();

        assert_eq!(collect_pages(docs), vec!["a.md", "b/c.md", "z.md"]);
    }
}
