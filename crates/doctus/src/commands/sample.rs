//! `doctus sample` command implementation.

use std::path::PathBuf;

use clap::Args;
use doctus_renderer::SAMPLE_DOCUMENT;

use crate::error::CliError;
use crate::input::write_output;
use crate::output::Output;

/// Arguments for the sample command.
#[derive(Args)]
pub(crate) struct SampleArgs {
    /// Write the sample to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SampleArgs {
    /// Execute the sample command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        write_output(self.output.as_deref(), SAMPLE_DOCUMENT)?;
        if let Some(path) = &self.output {
            let output = Output::new();
            output.wrote("Wrote sample", path, SAMPLE_DOCUMENT.len());
            output.highlight(&format!("Try: doctus render {}", path.display()));
        }
        Ok(())
    }
}
