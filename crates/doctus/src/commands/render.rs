//! `doctus render` command implementation.

use std::path::PathBuf;

use clap::Args;
use doctus_renderer::Pipeline;

use super::PageArgs;
use crate::error::CliError;
use crate::input::{Source, write_output};
use crate::output::Output;
use crate::page;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin, also `-`).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document can't be
    /// read or written. Markdown problems never fail the command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.page.load_config(None)?;

        let source = Source::from_arg(self.input.as_deref());
        let text = source.read(&output)?;

        let fragment = Pipeline::new().render_document(&text);
        let html = page::finish(fragment, &config.output, source.path());
        write_output(self.output.as_deref(), &html)?;

        if let Some(path) = &self.output {
            output.wrote("Rendered", path, html.len());
        }
        Ok(())
    }
}
