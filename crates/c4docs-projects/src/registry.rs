//! Registry of LikeC4 projects discovered in a documentation tree.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::Path;

use ignore::WalkBuilder;

use crate::key::ProjectKey;
use crate::manifest::{MANIFEST_FILENAME, Manifest};

/// Relative directory string used for the docs root itself.
pub const ROOT_DIR: &str = ".";

/// Mapping from project to its directory relative to the docs root.
///
/// Directories use `/` separators, with [`ROOT_DIR`] for the docs root.
/// The registry is built once per build by [`scan`](Self::scan) and only
/// read afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectRegistry {
    projects: BTreeMap<ProjectKey, String>,
}

impl ProjectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `docs_dir` for `likec4.config.json` manifests.
    ///
    /// See [`scan_with_manifest`](Self::scan_with_manifest).
    #[must_use]
    pub fn scan(docs_dir: &Path) -> Self {
        Self::scan_with_manifest(docs_dir, MANIFEST_FILENAME)
    }

    /// Scan `docs_dir` recursively for manifests named `manifest_filename`.
    ///
    /// Each manifest with a non-empty `name` registers that name with the
    /// manifest's directory. Unreadable or malformed manifests are logged and
    /// skipped. Directory entries are visited in file name order, so when two
    /// manifests declare the same name the last one in that order wins.
    ///
    /// When no project is found, the default project is registered at the
    /// docs root. A missing `docs_dir` yields an empty registry.
    #[must_use]
    pub fn scan_with_manifest(docs_dir: &Path, manifest_filename: &str) -> Self {
        let mut registry = Self::new();

        if !docs_dir.exists() {
            tracing::warn!(path = %docs_dir.display(), "Docs directory does not exist");
            return registry;
        }

        let walker = WalkBuilder::new(docs_dir)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to walk docs directory");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_none_or(|t| !t.is_file())
                || path.file_name().is_none_or(|name| name != manifest_filename)
            {
                continue;
            }

            let manifest = match Manifest::load(path) {
                Ok(manifest) => manifest,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read project manifest");
                    continue;
                }
            };
            let Some(name) = manifest.project_name() else {
                continue;
            };
            let Some(dir) = path
                .parent()
                .and_then(|parent| parent.strip_prefix(docs_dir).ok())
            else {
                continue;
            };

            let dir = relative_dir(dir);
            tracing::info!(project = %name, path = %dir, "Discovered LikeC4 project");
            registry.insert(ProjectKey::named(name), dir);
        }

        if registry.is_empty() {
            tracing::info!("No LikeC4 projects discovered, using default root project");
            registry.insert(ProjectKey::Default, ROOT_DIR);
        }

        registry
    }

    /// Register a project directory, replacing any previous entry.
    pub fn insert(&mut self, key: ProjectKey, dir: impl Into<String>) {
        let dir = dir.into();
        if let Some(previous) = self.projects.get(&key)
            && *previous != dir
        {
            tracing::warn!(
                project = %key,
                path1 = %previous,
                path2 = %dir,
                "Project name collision: two manifests declare the same name"
            );
        }
        self.projects.insert(key, dir);
    }

    /// Directory of a project, relative to the docs root.
    #[must_use]
    pub fn get(&self, key: &ProjectKey) -> Option<&str> {
        self.projects.get(key).map(String::as_str)
    }

    /// Whether the project is registered.
    #[must_use]
    pub fn contains(&self, key: &ProjectKey) -> bool {
        self.projects.contains_key(key)
    }

    /// Number of registered projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether no project is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Iterate over projects in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, ProjectKey, String> {
        self.projects.iter()
    }

    /// Find the project governing the page at `page_path`.
    ///
    /// Starting at the page's directory, each ancestor up to and including
    /// `docs_dir` is compared (as a relative path) with the registered
    /// directories. The first exact match wins, so an inner project takes
    /// precedence over an enclosing one. Pages outside `docs_dir` resolve to
    /// `None`.
    #[must_use]
    pub fn nearest(&self, page_path: &Path, docs_dir: &Path) -> Option<&ProjectKey> {
        let mut current = page_path.parent()?;
        loop {
            let rel = current.strip_prefix(docs_dir).ok()?;
            let rel_dir = relative_dir(rel);
            if let Some((key, _)) = self.projects.iter().find(|(_, dir)| **dir == rel_dir) {
                return Some(key);
            }
            if rel.as_os_str().is_empty() {
                return None;
            }
            current = current.parent()?;
        }
    }
}

impl<'a> IntoIterator for &'a ProjectRegistry {
    type Item = (&'a ProjectKey, &'a String);
    type IntoIter = btree_map::Iter<'a, ProjectKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Format a relative directory with `/` separators (`.` for empty).
fn relative_dir(rel: &Path) -> String {
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        ROOT_DIR.to_owned()
    } else {
        parts.join("/")
    }
}
