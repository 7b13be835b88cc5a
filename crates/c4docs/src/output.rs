//! Terminal reporting for c4docs commands.
//!
//! Messages go to stderr so `c4docs render` can keep stdout for markdown.

use std::path::Path;

use c4docs_build::BuildReport;
use c4docs_projects::ProjectRegistry;
use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.yellow, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Report a finished build: one line per generated bundle, a warning per
    /// skipped or failed project, then a green summary.
    pub(crate) fn build_report(&self, report: &BuildReport, site_dir: &Path) {
        let generation = &report.generation;
        for project in &generation.generated {
            self.info(&format!("Generated web component: {project}"));
        }
        for project in &generation.skipped {
            self.warning(&format!("Skipped undiscovered project: {project}"));
        }
        for project in &generation.failed {
            self.warning(&format!("Failed to generate web component: {project}"));
        }
        self.styled(&self.green, &build_summary(report, site_dir));
    }

    /// List discovered projects, or warn when there are none.
    pub(crate) fn projects(&self, registry: &ProjectRegistry, source_dir: &Path) {
        if registry.is_empty() {
            self.warning(&format!("No LikeC4 projects in {}", source_dir.display()));
            return;
        }
        for line in project_listing(registry) {
            self.info(&line);
        }
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}

fn build_summary(report: &BuildReport, site_dir: &Path) -> String {
    let pages = plural(report.pages, "page", "pages");
    let projects = plural(report.generation.generated.len(), "project", "projects");
    format!("Built {pages} with {projects} to {}", site_dir.display())
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// One `name  dir` line per project, names padded to a common width.
fn project_listing(registry: &ProjectRegistry) -> Vec<String> {
    let width = registry
        .iter()
        .map(|(key, _)| key.to_string().len())
        .max()
        .unwrap_or(0);
    registry
        .iter()
        .map(|(key, dir)| format!("{:<width$}  {dir}", key.to_string()))
        .collect()
}
