//! Per-page record of the LikeC4 projects used during a build.

use std::collections::{BTreeMap, BTreeSet};

use c4docs_projects::ProjectKey;

/// Projects referenced by view blocks, keyed by page source URI.
///
/// Entries only grow during a build. Pages without view blocks never get an
/// entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageProjects {
    pages: BTreeMap<String, BTreeSet<ProjectKey>>,
}

impl PageProjects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `page` uses `project`.
    pub fn record(&mut self, page: &str, project: ProjectKey) {
        self.pages
            .entry(page.to_owned())
            .or_default()
            .insert(project);
    }

    /// Projects used on `page`, if it has any view blocks.
    #[must_use]
    pub fn projects_on(&self, page: &str) -> Option<&BTreeSet<ProjectKey>> {
        self.pages.get(page)
    }

    /// Distinct projects used across all pages.
    #[must_use]
    pub fn all_projects(&self) -> BTreeSet<ProjectKey> {
        self.pages.values().flatten().cloned().collect()
    }

    /// Number of pages with view blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
