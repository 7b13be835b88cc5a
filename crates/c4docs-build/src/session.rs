//! Build session: per-build state and lifecycle hooks.

use std::path::{Path, PathBuf};

use c4docs_projects::{MANIFEST_FILENAME, ProjectKey, ProjectRegistry};
use c4docs_views::{ASSETS_DIR, ViewBlockRewriter, prepend_scripts, script_path};

use crate::generator::{GenerateRequest, WebComponentGenerator};
use crate::tracker::PageProjects;

/// Options for a build session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Whether the generator lays out views with Graphviz (dot).
    pub use_dot: bool,
    /// Site-relative directory for generated scripts.
    pub assets_dir: String,
    /// File name of project manifests.
    pub manifest: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            use_dot: true,
            assets_dir: ASSETS_DIR.to_owned(),
            manifest: MANIFEST_FILENAME.to_owned(),
        }
    }
}

/// Identity of a page passed to the page hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Source path relative to the docs directory, with `/` separators.
    pub src_uri: String,
    /// Site-relative URL of the rendered page.
    pub url: String,
}

impl PageRef {
    #[must_use]
    pub fn new(src_uri: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            src_uri: src_uri.into(),
            url: url.into(),
        }
    }
}

/// Outcome of web component generation after a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Projects whose bundle was generated.
    pub generated: Vec<ProjectKey>,
    /// Projects whose generator run failed.
    pub failed: Vec<ProjectKey>,
    /// Projects used by pages but not discovered in the docs tree.
    pub skipped: Vec<ProjectKey>,
}

/// State of one documentation build.
///
/// Created when the build is configured, fed every page through
/// [`on_page_markdown`](Self::on_page_markdown) and
/// [`on_page_content`](Self::on_page_content), and finished with
/// [`on_post_build`](Self::on_post_build). Each build gets a fresh session.
#[derive(Debug)]
pub struct BuildSession {
    docs_dir: PathBuf,
    options: SessionOptions,
    registry: ProjectRegistry,
    pages: PageProjects,
}

impl BuildSession {
    /// Start a build for `docs_dir`, discovering its LikeC4 projects.
    #[must_use]
    pub fn configure(docs_dir: impl Into<PathBuf>, options: SessionOptions) -> Self {
        let docs_dir = docs_dir.into();
        let registry = ProjectRegistry::scan_with_manifest(&docs_dir, &options.manifest);
        Self::with_registry(docs_dir, registry, options)
    }

    /// Start a build with an already populated project registry.
    #[must_use]
    pub fn with_registry(
        docs_dir: impl Into<PathBuf>,
        registry: ProjectRegistry,
        options: SessionOptions,
    ) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            options,
            registry,
            pages: PageProjects::new(),
        }
    }

    #[must_use]
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    /// Projects recorded per page so far.
    #[must_use]
    pub fn pages(&self) -> &PageProjects {
        &self.pages
    }

    /// Rewrite `likec4-view` blocks in a page's markdown.
    ///
    /// Blocks without `project=` get the nearest enclosing project of the
    /// page, if any. Every project used on the page is recorded for script
    /// injection and generation.
    pub fn on_page_markdown(&mut self, page: &PageRef, markdown: &str) -> String {
        self.rewrite_page(page, markdown, |element| element)
    }

    /// Like [`on_page_markdown`](Self::on_page_markdown), but each rendered
    /// element is passed through `emit` and its return value is spliced into
    /// the markdown instead.
    pub(crate) fn rewrite_page<F>(&mut self, page: &PageRef, markdown: &str, mut emit: F) -> String
    where
        F: FnMut(String) -> String,
    {
        let page_path = self.docs_dir.join(&page.src_uri);
        let mut used = Vec::new();

        let output = ViewBlockRewriter::new().rewrite(markdown, |mut opts| {
            if opts.project.is_none()
                && let Some(ProjectKey::Named(name)) = self.registry.nearest(&page_path, &self.docs_dir)
            {
                tracing::debug!(project = %name, page = %page.src_uri, "Auto-detected project");
                opts.project = Some(name.clone());
            }
            used.push(ProjectKey::from(opts.project.clone()));
            emit(opts.to_html())
        });

        for project in used {
            self.pages.record(&page.src_uri, project);
        }
        output
    }

    /// Prepend web component scripts for the projects used on a page.
    ///
    /// Pages without view blocks are returned unchanged.
    #[must_use]
    pub fn on_page_content(&self, page: &PageRef, html: &str) -> String {
        let Some(projects) = self.pages.projects_on(&page.src_uri) else {
            return html.to_owned();
        };
        let scripts = projects
            .iter()
            .map(|project| script_path(&self.options.assets_dir, project.name()));
        prepend_scripts(html, &page.url, scripts)
    }

    /// Generate web component bundles for every project used in the build.
    ///
    /// The generator runs once per distinct project. Projects that were not
    /// discovered are skipped with a warning; a failed run is logged and does
    /// not stop the remaining projects.
    pub fn on_post_build(
        &self,
        site_dir: &Path,
        generator: &dyn WebComponentGenerator,
    ) -> GenerationReport {
        let mut report = GenerationReport::default();

        for project in self.pages.all_projects() {
            let Some(project_dir) = self.registry.get(&project) else {
                tracing::warn!(project = %project, "Skipping generation for undiscovered project");
                report.skipped.push(project);
                continue;
            };

            let request = GenerateRequest {
                project: &project,
                project_dir,
                docs_dir: &self.docs_dir,
                output: site_dir.join(script_path(&self.options.assets_dir, project.name())),
                use_dot: self.options.use_dot,
            };

            match generator.generate(&request) {
                Ok(()) => report.generated.push(project),
                Err(e) => {
                    tracing::error!(project = %project, error = %e, "Failed to generate web component");
                    report.failed.push(project);
                }
            }
        }

        report
    }
}
