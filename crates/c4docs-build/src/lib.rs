//! Build session and LikeC4 web component generation for c4docs.
//!
//! A [`BuildSession`] owns all state of one documentation build and exposes
//! the lifecycle hooks a site generator calls:
//!
//! 1. [`BuildSession::configure`]: scan the docs tree for LikeC4 projects
//! 2. [`BuildSession::on_page_markdown`]: rewrite `likec4-view` blocks and
//!    record the projects each page uses
//! 3. [`BuildSession::on_page_content`]: prepend web component scripts to
//!    rendered page HTML
//! 4. [`BuildSession::on_post_build`]: generate one web component bundle per
//!    used project through a [`WebComponentGenerator`]
//!
//! [`SiteBuilder`] drives these hooks for a plain markdown tree, rendering
//! pages with pulldown-cmark.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use c4docs_build::{BuildSession, LikeC4Cli, SessionOptions, SiteBuilder};
//!
//! let session = BuildSession::configure("docs", SessionOptions::default());
//! let report = SiteBuilder::new(session).build(Path::new("site"), &LikeC4Cli::default())?;
//! println!("{} pages", report.pages);
//! # Ok::<(), c4docs_build::BuildError>(())
//! ```

mod generator;
mod session;
mod site;
mod template;
mod tracker;

pub use generator::{GenerateError, GenerateRequest, LikeC4Cli, WebComponentGenerator};
pub use session::{BuildSession, GenerationReport, PageRef, SessionOptions};
pub use site::{BuildError, BuildReport, SiteBuilder, page_url};
pub use tracker::PageProjects;
