//! `c4docs projects` command implementation.

use std::path::PathBuf;

use c4docs_config::{CliSettings, Config};
use c4docs_projects::ProjectRegistry;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the projects command.
#[derive(Args)]
pub(crate) struct ProjectsArgs {
    /// Path to configuration file (default: auto-discover c4docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectsArgs {
    /// Execute the projects command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;

        tracing::debug!(
            config = ?config.config_path,
            manifest = %config.likec4.manifest,
            "Loaded configuration"
        );

        let registry = ProjectRegistry::scan_with_manifest(source_dir, &config.likec4.manifest);
        output.projects(&registry, source_dir);
        Ok(())
    }
}
