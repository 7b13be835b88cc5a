//! LikeC4 view directives for markdown pages.
//!
//! Page authors embed architecture diagrams with a fenced block:
//!
//! ````markdown
//! ```likec4-view browser=false project=billing
//! index
//! ```
//! ````
//!
//! This crate recognizes those blocks in raw page markdown and replaces each
//! one with a LikeC4 web component element that passes through the markdown
//! renderer unchanged.
//!
//! # Architecture
//!
//! - [`identifier`](is_valid_identifier): safe name tokens for projects and views
//! - [`ViewOptions`]: option parsing and HTML rendering for a single view
//! - [`ViewBlockRewriter`]: line-based block recognition and replacement
//! - [`script_path`] / [`prepend_scripts`]: per-project web component scripts
//!
//! # Example
//!
//! ```
//! use c4docs_views::ViewBlockRewriter;
//!
//! let markdown = "# Title\n\n```likec4-view\nindex\n```\n";
//! let output = ViewBlockRewriter::new().rewrite(markdown, |opts| opts.to_html());
//! assert!(output.contains(r#"<likec4-view view-id="index""#));
//! ```

mod block;
mod fence;
mod html;
mod identifier;
mod options;
mod script;
mod util;

pub use block::{ViewBlock, ViewBlockRewriter, find_view_blocks};
pub use html::escape_html;
pub use identifier::is_valid_identifier;
pub use options::{DEFAULT_TAG, DynamicVariant, ViewOptions};
pub use script::{ASSETS_DIR, prepend_scripts, script_path, script_tag};
pub use util::relative_path;
