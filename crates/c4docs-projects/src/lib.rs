//! LikeC4 project discovery for documentation trees.
//!
//! A documentation tree may contain several LikeC4 projects, each marked by a
//! `likec4.config.json` manifest in its root directory. This crate scans the
//! tree for manifests, keeps a registry of project name to directory, and
//! resolves which project governs a page by walking up from the page's
//! directory.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use c4docs_projects::ProjectRegistry;
//!
//! let docs_dir = Path::new("docs");
//! let registry = ProjectRegistry::scan(docs_dir);
//! let project = registry.nearest(&docs_dir.join("billing/api/index.md"), docs_dir);
//! println!("{project:?}");
//! ```

mod key;
mod manifest;
mod registry;

pub use key::ProjectKey;
pub use manifest::{MANIFEST_FILENAME, Manifest, ManifestError};
pub use registry::{ROOT_DIR, ProjectRegistry};
