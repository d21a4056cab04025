//! Doctus CLI - extended-markdown to HTML renderer.
//!
//! Provides commands for:
//! - `render`: Render a document through the full Doctus pipeline
//! - `export`: Render plain markdown without the Doctus extensions
//! - `watch`: Re-render a document whenever it changes
//! - `sample`: Print the built-in sample document

mod commands;
mod error;
mod input;
mod output;
mod page;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, RenderArgs, SampleArgs, WatchArgs};
use output::Output;

/// Doctus - extended-markdown to HTML renderer.
#[derive(Parser)]
#[command(name = "doctus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML.
    Render(RenderArgs),
    /// Render plain markdown to HTML, without Doctus extensions.
    Export(ExportArgs),
    /// Re-render a document on every change.
    Watch(WatchArgs),
    /// Print the sample document showing every extension.
    Sample(SampleArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.page.verbose,
            Self::Export(args) => args.verbose,
            Self::Watch(args) => args.page.verbose,
            Self::Sample(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
        Commands::Sample(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_verbose_log_filter() {
        assert_eq!(log_filter(true).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_default_log_filter_is_warn() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(log_filter(false).max_level_hint(), Some(LevelFilter::WARN));
        }
    }
}
