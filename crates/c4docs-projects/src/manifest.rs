//! LikeC4 project manifest (`likec4.config.json`).

use std::path::Path;

use serde::Deserialize;

/// File name that marks the root of a LikeC4 project.
pub const MANIFEST_FILENAME: &str = "likec4.config.json";

/// Project manifest contents relevant to discovery.
///
/// Manifests are JSON5, so comments and trailing commas are accepted.
/// Fields other than `name` are ignored.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    /// Project name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Error reading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON5 parse error: {0}")]
    Parse(#[from] json5::Error),
}

impl Manifest {
    /// Parse manifest text.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(json5::from_str(content)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Non-empty project name, if declared.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
