//! c4docs CLI - Documentation builder with embedded LikeC4 views.
//!
//! Provides commands for:
//! - `build`: Render the docs tree and generate LikeC4 web components
//! - `projects`: List the LikeC4 projects discovered in the docs tree
//! - `render`: Print a page's markdown with `likec4-view` blocks replaced

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ProjectsArgs, RenderArgs};
use output::Output;

/// c4docs - Documentation builder with embedded LikeC4 views.
#[derive(Parser)]
#[command(name = "c4docs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site.
    Build(BuildArgs),
    /// List discovered LikeC4 projects.
    Projects(ProjectsArgs),
    /// Print a page with view blocks rewritten.
    Render(RenderArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose,
            Self::Projects(args) => args.verbose,
            Self::Render(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Projects(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
