//! CLI error types.

use std::path::PathBuf;

use doctus_config::ConfigError;
use doctus_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Couldn't {action} {}: {source}", path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("File watcher failed: {0}")]
    Watch(#[from] notify::Error),

    #[error("{0}")]
    Validation(String),
}

impl CliError {
    /// Attach the file and the attempted action to an I/O error.
    pub(crate) fn file(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::File {
            action,
            path,
            source,
        }
    }
}
