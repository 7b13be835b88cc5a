//! View options parsed from a `likec4-view` block and their HTML rendering.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::html::escape_html;
use crate::identifier::is_valid_identifier;

/// Element name used when a view has no (valid) project.
pub const DEFAULT_TAG: &str = "likec4-view";

static OPT_BROWSER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbrowser=(true|false)\b").expect("invalid browser regex"));
static OPT_VARIANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bdynamic-variant=(diagram|sequence)\b").expect("invalid variant regex")
});
static OPT_PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bproject=(\S+)\b").expect("invalid project regex"));

/// How dynamic views are presented by the web component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DynamicVariant {
    /// Regular diagram layout.
    #[default]
    Diagram,
    /// Sequence diagram layout.
    Sequence,
}

impl DynamicVariant {
    /// Parse variant from option value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "diagram" => Some(Self::Diagram),
            "sequence" => Some(Self::Sequence),
            _ => None,
        }
    }

    /// Return variant as attribute value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diagram => "diagram",
            Self::Sequence => "sequence",
        }
    }
}

impl fmt::Display for DynamicVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a single embedded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// View id from the block body. Not validated at parse time.
    pub view_id: String,
    /// Whether the web component opens the interactive browser on click.
    pub browser: bool,
    /// Presentation of dynamic views.
    pub dynamic_variant: DynamicVariant,
    /// Explicit or resolved project name.
    pub project: Option<String>,
}

impl ViewOptions {
    /// Create options with defaults for the given view id.
    #[must_use]
    pub fn new(view_id: impl Into<String>) -> Self {
        Self {
            view_id: view_id.into(),
            browser: true,
            dynamic_variant: DynamicVariant::Diagram,
            project: None,
        }
    }

    /// Parse options from the text following the `likec4-view` tag.
    ///
    /// Recognized tokens may appear in any order, mixed with unrelated text:
    /// `browser=true|false`, `dynamic-variant=diagram|sequence` and
    /// `project=<name>`. The first occurrence of each token wins. Values
    /// outside the allowed set leave the default in place.
    ///
    /// # Example
    ///
    /// ```
    /// use c4docs_views::{DynamicVariant, ViewOptions};
    ///
    /// let opts = ViewOptions::parse("project=billing browser=false", "index");
    /// assert!(!opts.browser);
    /// assert_eq!(opts.dynamic_variant, DynamicVariant::Diagram);
    /// assert_eq!(opts.project.as_deref(), Some("billing"));
    /// ```
    #[must_use]
    pub fn parse(options_text: &str, view_id: impl Into<String>) -> Self {
        let mut opts = Self::new(view_id);

        if let Some(caps) = OPT_BROWSER.captures(options_text) {
            opts.browser = &caps[1] == "true";
        }
        if let Some(variant) = OPT_VARIANT
            .captures(options_text)
            .and_then(|caps| DynamicVariant::parse(&caps[1]))
        {
            opts.dynamic_variant = variant;
        }
        if let Some(caps) = OPT_PROJECT.captures(options_text) {
            opts.project = Some(caps[1].to_owned());
        }

        opts
    }

    /// Element name for this view.
    ///
    /// `<project>-view` (lowercased) when a valid project is set, otherwise
    /// [`DEFAULT_TAG`]. An invalid project name is logged and ignored.
    #[must_use]
    pub fn tag(&self) -> String {
        match self.project.as_deref() {
            Some(project) if is_valid_identifier(project) => {
                format!("{}-view", project.to_ascii_lowercase())
            }
            Some(project) => {
                tracing::warn!(
                    project = %project,
                    "Invalid project name, using '{DEFAULT_TAG}' tag"
                );
                DEFAULT_TAG.to_owned()
            }
            None => DEFAULT_TAG.to_owned(),
        }
    }

    /// Render the web component element for this view.
    ///
    /// The view id is always attribute-escaped, even when it is not a valid
    /// identifier (a warning is logged in that case).
    ///
    /// # Example
    ///
    /// ```
    /// use c4docs_views::ViewOptions;
    ///
    /// let html = ViewOptions::parse("project=Billing", "index").to_html();
    /// assert_eq!(
    ///     html,
    ///     r#"<billing-view view-id="index" browser="true" dynamic-variant="diagram"></billing-view>"#
    /// );
    /// ```
    #[must_use]
    pub fn to_html(&self) -> String {
        if !is_valid_identifier(&self.view_id) {
            tracing::warn!(view_id = %self.view_id, "Invalid view ID: contains unsafe characters");
        }

        let tag = self.tag();
        format!(
            r#"<{tag} view-id="{}" browser="{}" dynamic-variant="{}"></{tag}>"#,
            escape_html(&self.view_id),
            self.browser,
            self.dynamic_variant,
        )
    }
}
