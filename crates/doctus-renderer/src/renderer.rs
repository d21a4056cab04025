//! Base renderer adapter.
//!
//! The [`Renderer`] trait is the seam between the Doctus passes and the
//! markdown engine. [`CmarkRenderer`] implements it on top of pulldown-cmark.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pulldown_cmark::{Event, Options, Parser, html};

/// Outcome of a base rendering call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Rendered HTML.
    Html(String),
    /// The engine failed; carries a human-readable message.
    RenderFailed(String),
}

impl RenderOutcome {
    /// Convert into a `Result`, turning a failure into [`RenderError`].
    pub fn into_result(self) -> Result<String, RenderError> {
        match self {
            Self::Html(html) => Ok(html),
            Self::RenderFailed(message) => Err(RenderError::Engine(message)),
        }
    }
}

/// Error returned by the strict rendering entry points.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The markdown engine failed on the document.
    #[error("Couldn't convert markdown to HTML: {0}")]
    Engine(String),
}

/// Markdown-to-HTML capability.
///
/// Any engine that supports tables, footnotes, definition lists, hard line
/// breaks, typographic punctuation and fenced code blocks can stand behind
/// this trait without touching the pre- and post-passes.
pub trait Renderer {
    /// Render standard markdown to HTML. Never panics.
    fn render(&self, markdown: &str) -> RenderOutcome;
}

/// pulldown-cmark backed renderer.
///
/// Enabled by default:
/// - tables, footnotes, definition lists, heading attributes
/// - hard line breaks (every soft break becomes `<br />`)
/// - smart punctuation (curly quotes, en and em dashes)
///
/// Fenced code blocks keep their language as `class="language-xxx"`.
/// Strikethrough stays off: `~~` belongs to the extension pre-pass.
#[derive(Clone, Debug)]
pub struct CmarkRenderer {
    hard_breaks: bool,
    smart_punctuation: bool,
}

impl CmarkRenderer {
    /// Create a renderer with the Doctus option set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hard_breaks: true,
            smart_punctuation: true,
        }
    }

    /// Enable or disable rendering soft breaks as `<br />`.
    #[must_use]
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.hard_breaks = enabled;
        self
    }

    /// Enable or disable typographic quote and dash substitution.
    #[must_use]
    pub fn with_smart_punctuation(mut self, enabled: bool) -> Self {
        self.smart_punctuation = enabled;
        self
    }

    /// Get parser options for the configured feature set.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_HEADING_ATTRIBUTES;
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    fn render_html(&self, markdown: &str) -> String {
        let hard_breaks = self.hard_breaks;
        let events = self.create_parser(markdown).map(move |event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut output, events);
        output
    }
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> RenderOutcome {
        match panic::catch_unwind(AssertUnwindSafe(|| self.render_html(markdown))) {
            Ok(html) => RenderOutcome::Html(html),
            Err(payload) => RenderOutcome::RenderFailed(panic_message(payload.as_ref())),
        }
    }
}

/// Extract a message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "markdown engine panicked".to_owned()
    }
}
