//! `doctus watch` command implementation.
//!
//! Renders the document once, then again after every burst of changes.
//! Editors often emit several events per save (truncate, write, rename), so
//! events are debounced: each relevant event restarts a quiet-period timer
//! and rendering happens only once the timer expires.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use clap::Args;
use doctus_config::OutputConfig;
use doctus_renderer::Pipeline;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use super::PageArgs;
use crate::error::CliError;
use crate::input::{Source, html_path_for, write_output};
use crate::output::Output;
use crate::page;

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Markdown file to watch.
    input: PathBuf,

    /// HTML output file (default: INPUT with an .html extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Quiet interval in milliseconds before re-rendering (overrides config).
    #[arg(long)]
    debounce_ms: Option<u64>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl WatchArgs {
    /// Execute the watch command. Runs until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the output path would
    /// overwrite the input, or the file watcher can't be started.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.page.load_config(self.debounce_ms)?;

        let target = self
            .output
            .clone()
            .unwrap_or_else(|| html_path_for(&self.input));
        if target == self.input {
            return Err(CliError::Validation(format!(
                "Output would overwrite the input file {}",
                self.input.display()
            )));
        }
        let file_name = self.input.file_name().map(OsString::from).ok_or_else(|| {
            CliError::Validation(format!("Not a file: {}", self.input.display()))
        })?;

        let session = Session {
            source: Source::File(self.input.clone()),
            target,
            config: config.output,
            pipeline: Pipeline::new(),
        };
        session.render(&output);

        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })?;
        // Watch the directory: editors that save by rename replace the inode.
        watcher.watch(&watch_dir(&self.input), RecursiveMode::NonRecursive)?;

        output.highlight(&format!(
            "Watching {} (Ctrl+C to stop)",
            self.input.display()
        ));

        let debouncer = Debouncer::new(Duration::from_millis(config.watch.debounce_ms));
        while let Some(events) = debouncer.wait(&rx, |res| touches(res, &file_name)) {
            tracing::info!(events, "Change detected");
            session.render(&output);
        }
        Ok(())
    }
}

/// State of one watch session.
struct Session {
    source: Source,
    target: PathBuf,
    config: OutputConfig,
    pipeline: Pipeline,
}

impl Session {
    /// Render the source into the target, reporting problems without stopping.
    fn render(&self, output: &Output) {
        let text = match self.source.read(output) {
            Ok(text) => text,
            Err(err) => {
                // The file may be briefly missing while an editor replaces it.
                output.warning(&format!("Skipped render: {err}"));
                return;
            }
        };
        let fragment = self.pipeline.render_document(&text);
        let html = page::finish(fragment, &self.config, self.source.path());
        match write_output(Some(&self.target), &html) {
            Ok(()) => output.wrote("Rendered", &self.target, html.len()),
            Err(err) => output.error(&format!("Error: {err}")),
        }
    }
}

/// Directory holding `input`, `.` for a bare file name.
fn watch_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Check whether a watcher event changes the file called `file_name`.
fn touches(res: &notify::Result<Event>, file_name: &OsStr) -> bool {
    let event = match res {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "File watcher error");
            return false;
        }
    };
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|path| path.file_name() == Some(file_name))
}

/// Timer-cancel-reschedule debouncer over a channel of events.
struct Debouncer {
    quiet: Duration,
}

impl Debouncer {
    fn new(quiet: Duration) -> Self {
        Self { quiet }
    }

    /// Block until a burst of relevant events has settled.
    ///
    /// Waits for the first relevant event, then keeps absorbing events until
    /// `quiet` passes without a relevant one. Returns the number of relevant
    /// events in the burst, or `None` once the channel is closed and no
    /// burst is pending.
    fn wait<T>(&self, rx: &Receiver<T>, mut relevant: impl FnMut(&T) -> bool) -> Option<usize> {
        loop {
            let event = rx.recv().ok()?;
            if relevant(&event) {
                break;
            }
        }

        let mut count = 1;
        let mut deadline = Instant::now() + self.quiet;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(event) if relevant(&event) => {
                    count += 1;
                    deadline = Instant::now() + self.quiet;
                }
                Ok(_) => {}
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                    return Some(count);
                }
            }
        }
    }
}
