//! `c4docs render` command implementation.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use c4docs_build::{BuildSession, PageRef, page_url};
use c4docs_config::{CliSettings, Config};
use clap::Args;

use super::session_options;
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown page, relative to the source directory or the current one.
    page: PathBuf,

    /// Path to configuration file (default: auto-discover c4docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command, printing the rewritten markdown to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the page cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;

        let cwd = std::env::current_dir()?;
        let src_uri = page_src_uri(&self.page, source_dir, &cwd).ok_or_else(|| {
            CliError::Validation(format!(
                "Page {} is not inside {}",
                self.page.display(),
                source_dir.display()
            ))
        })?;
        let markdown = std::fs::read_to_string(source_dir.join(&src_uri))?;

        let mut session = BuildSession::configure(source_dir, session_options(&config.likec4));
        let url = page_url(&src_uri);
        tracing::debug!(page = %src_uri, source_dir = %source_dir.display(), "Rendering page");
        let page = PageRef::new(src_uri, url);
        let rendered = session.on_page_markdown(&page, &markdown);
        std::io::stdout().lock().write_all(rendered.as_bytes())?;
        Ok(())
    }
}

/// Resolve a page argument to a `/`-separated path relative to `source_dir`.
///
/// A relative page is looked up against `cwd` first, then taken as already
/// relative to `source_dir`. Paths escaping the source directory are rejected.
fn page_src_uri(page: &Path, source_dir: &Path, cwd: &Path) -> Option<String> {
    let joined;
    let relative = if page.is_absolute() {
        page.strip_prefix(source_dir).ok()?
    } else {
        joined = cwd.join(page);
        joined
            .strip_prefix(source_dir)
            .or_else(|_| page.strip_prefix(source_dir))
            .unwrap_or(page)
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
