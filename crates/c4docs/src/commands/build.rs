//! `c4docs build` command implementation.

use std::path::PathBuf;

use c4docs_build::{BuildSession, LikeC4Cli, SiteBuilder};
use c4docs_config::{CliSettings, Config};
use clap::Args;

use super::session_options;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover c4docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Disable Graphviz (dot) layout in generated web components.
    #[arg(long)]
    no_use_dot: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            site_dir: self.output_dir,
            use_dot: self.no_use_dot.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;
        let site_dir = &config.docs_resolved.site_dir;
        tracing::debug!(
            config = ?config.config_path,
            use_dot = config.likec4.use_dot,
            command = ?config.likec4.command,
            "Loaded configuration"
        );

        output.info(&format!("Source: {}", source_dir.display()));
        output.info(&format!("Output: {}", site_dir.display()));

        let session = BuildSession::configure(source_dir, session_options(&config.likec4));
        let generator = LikeC4Cli::new(config.likec4.command.iter());
        let report = SiteBuilder::new(session).build(site_dir, &generator)?;

        output.build_report(&report, site_dir);
        Ok(())
    }
}
