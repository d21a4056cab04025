//! CLI command implementations.

mod export;
mod render;
mod sample;
mod watch;

use std::path::PathBuf;

use clap::Args;
use doctus_config::{CliSettings, Config, Theme};

use crate::error::CliError;

pub(crate) use export::ExportArgs;
pub(crate) use render::RenderArgs;
pub(crate) use sample::SampleArgs;
pub(crate) use watch::WatchArgs;

/// Page and configuration options shared by `render` and `watch`.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Path to configuration file (default: auto-discover doctus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wrap the output into a complete HTML page (overrides config).
    #[arg(long)]
    standalone: bool,

    /// Page theme: light or dark (overrides config).
    #[arg(long)]
    theme: Option<Theme>,

    /// Page font size in pixels (overrides config).
    #[arg(long)]
    font_size: Option<u8>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl PageArgs {
    /// Load configuration with these arguments applied on top.
    fn load_config(&self, debounce_ms: Option<u64>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            standalone: self.standalone.then_some(true),
            theme: self.theme,
            font_size: self.font_size,
            debounce_ms,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
