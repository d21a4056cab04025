//! `doctus export` command implementation.

use std::path::PathBuf;

use clap::Args;
use doctus_config::Config;
use doctus_renderer::Pipeline;

use crate::error::CliError;
use crate::input::{Source, write_output};
use crate::output::Output;
use crate::page;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Markdown file to export (default: stdin, also `-`).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover doctus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// Unlike `render`, the Doctus extensions are left as written and a
    /// markdown engine failure is reported as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the document can't be read
    /// or written, or the markdown engine fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let source = Source::from_arg(self.input.as_deref());
        let text = source.read(&output)?;

        let fragment = Pipeline::new().export_html(&text)?;
        let html = page::finish(fragment, &config.output, source.path());
        write_output(self.output.as_deref(), &html)?;

        if let Some(path) = &self.output {
            output.wrote("Exported", path, html.len());
        }
        Ok(())
    }
}
