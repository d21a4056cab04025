//! Pipeline orchestration.
//!
//! `source → trim → extension pre-pass → base renderer → blockquote post-pass`.

use std::borrow::Cow;

use crate::extension::resolve_extensions;
use crate::renderer::{CmarkRenderer, RenderError, RenderOutcome, Renderer};
use crate::restyle::restyle_blocks;
use crate::util::escape_html;

/// The Doctus rendering pipeline over a pluggable [`Renderer`].
///
/// Stateless: every call is a pure function of its input, so one pipeline
/// can serve any number of documents.
///
/// # Example
///
/// ```
/// use doctus_renderer::Pipeline;
///
/// let html = Pipeline::new().render_document("!!careful!!");
/// assert!(html.contains("color:#E62727"));
/// assert!(html.contains("careful"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pipeline<R = CmarkRenderer> {
    renderer: R,
}

impl Pipeline {
    /// Create a pipeline backed by [`CmarkRenderer`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: CmarkRenderer::new(),
        }
    }
}

impl<R: Renderer> Pipeline<R> {
    /// Create a pipeline backed by a custom renderer.
    #[must_use]
    pub fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    /// The base renderer in use.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render an extended-markdown document to final HTML.
    ///
    /// Never fails: a base renderer failure replaces the whole document with
    /// a red inline error fragment (see [`error_fragment`]).
    #[must_use]
    pub fn render_document(&self, source: &str) -> String {
        let source = prepare_source(source);
        let resolved = resolve_extensions(&source);

        match self.renderer.render(&resolved) {
            RenderOutcome::Html(html) => {
                let styled = restyle_blocks(&html);
                tracing::debug!(
                    source_len = source.len(),
                    html_len = styled.len(),
                    "Rendered document"
                );
                styled
            }
            RenderOutcome::RenderFailed(message) => {
                tracing::warn!(error = %message, "Base renderer failed");
                error_fragment(&message)
            }
        }
    }

    /// Render plain markdown to HTML without the Doctus extensions.
    ///
    /// This is the "copy as HTML" flavour: the trimmed source goes straight
    /// to the base renderer and a failure is returned to the caller.
    pub fn export_html(&self, source: &str) -> Result<String, RenderError> {
        self.renderer.render(&prepare_source(source)).into_result()
    }
}

/// Render a document with the default pipeline.
///
/// # Example
///
/// ```
/// use doctus_renderer::render_document;
///
/// let html = render_document("@red@stop@end@");
/// assert!(html.contains(r#"<span style="color:red;">stop</span>"#));
/// ```
#[must_use]
pub fn render_document(source: &str) -> String {
    Pipeline::new().render_document(source)
}

/// Render plain markdown with the default pipeline (no extensions).
pub fn export_html(source: &str) -> Result<String, RenderError> {
    Pipeline::new().export_html(source)
}

/// Inline HTML shown in place of a document the renderer could not handle.
#[must_use]
pub fn error_fragment(message: &str) -> String {
    format!(
        "<span style='color:red'>Parsing error: {}</span>",
        escape_html(message)
    )
}

/// Trim surrounding whitespace and normalize `\r\n` line endings.
fn prepare_source(source: &str) -> Cow<'_, str> {
    let trimmed = source.trim();
    if trimmed.contains('\r') {
        Cow::Owned(trimmed.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _markdown: &str) -> RenderOutcome {
            RenderOutcome::RenderFailed("unexpected <token>".to_owned())
        }
    }

    /// Hands the resolved markdown straight back.
    struct EchoRenderer;

    impl Renderer for EchoRenderer {
        fn render(&self, markdown: &str) -> RenderOutcome {
            RenderOutcome::Html(markdown.to_owned())
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(render_document("").trim().is_empty());
        assert!(render_document("  \n\t\n ").trim().is_empty());
    }

    #[test]
    fn test_source_is_trimmed() {
        let pipeline = Pipeline::with_renderer(EchoRenderer);
        assert_eq!(pipeline.render_document("\n\n  text  \n\n"), "text");
    }

    #[test]
    fn test_crlf_normalized() {
        let pipeline = Pipeline::with_renderer(EchoRenderer);
        assert_eq!(pipeline.render_document("a\r\n---\r\nb"), "a\n<hr>\n\nb");
    }

    #[test]
    fn test_renderer_receives_resolved_extensions() {
        let pipeline = Pipeline::with_renderer(EchoRenderer);
        assert_eq!(
            pipeline.render_document("~~gone~~"),
            r#"<span style="text-decoration:line-through;">gone</span>"#
        );
    }

    #[test]
    fn test_failure_becomes_error_fragment() {
        let pipeline = Pipeline::with_renderer(FailingRenderer);
        assert_eq!(
            pipeline.render_document("> quote"),
            "<span style='color:red'>Parsing error: unexpected &lt;token&gt;</span>"
        );
    }

    #[test]
    fn test_failure_skips_post_pass() {
        let pipeline = Pipeline::with_renderer(FailingRenderer);
        assert!(!pipeline.render_document("> quote").contains("blockquote"));
    }

    #[test]
    fn test_export_skips_extensions() {
        let html = export_html("  !!raw!! and > not a quote  ").unwrap();
        assert_eq!(html, "<p>!!raw!! and &gt; not a quote</p>\n");
    }

    #[test]
    fn test_export_reports_failure() {
        let pipeline = Pipeline::with_renderer(FailingRenderer);
        assert!(matches!(
            pipeline.export_html("x"),
            Err(RenderError::Engine(message)) if message == "unexpected <token>"
        ));
    }

    #[test]
    fn test_blockquote_restyled() {
        let html = render_document("> note");
        assert!(html.starts_with("<blockquote><div style=\"color:#7A7A73;"));
        assert!(html.contains("<i>\n<p>note</p>\n</i></div></blockquote>"));
    }

    #[test]
    fn test_renderer_accessor() {
        let pipeline = Pipeline::new();
        assert!(
            pipeline
                .renderer()
                .parser_options()
                .contains(pulldown_cmark::Options::ENABLE_TABLES)
        );
    }
}
