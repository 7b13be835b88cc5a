//! Project identity.

use std::fmt;

/// Key identifying a LikeC4 project within one documentation build.
///
/// `Default` is the unnamed project rooted at the docs directory, used when
/// no manifest declares a name. It sorts before all named projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectKey {
    /// The unnamed root project.
    Default,
    /// A project declared by a manifest `name`.
    Named(String),
}

impl ProjectKey {
    /// Create a key for a named project.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Project name, or `None` for the default project.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for ProjectKey {
    fn from(name: Option<String>) -> Self {
        name.map_or(Self::Default, Self::Named)
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("(default)"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sorts_first() {
        let mut keys = vec![
            ProjectKey::named("b"),
            ProjectKey::Default,
            ProjectKey::named("a"),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![ProjectKey::Default, ProjectKey::named("a"), ProjectKey::named("b")]
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ProjectKey::from(None), ProjectKey::Default);
        assert_eq!(
            ProjectKey::from(Some("billing".to_owned())),
            ProjectKey::named("billing")
        );
    }

    #[test]
    fn test_name_and_display() {
        assert_eq!(ProjectKey::Default.name(), None);
        assert_eq!(ProjectKey::named("billing").name(), Some("billing"));
        assert_eq!(ProjectKey::Default.to_string(), "(default)");
        assert_eq!(ProjectKey::named("billing").to_string(), "billing");
    }
}
