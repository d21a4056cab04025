//! Extended-markdown to HTML rendering pipeline.
//!
//! Doctus documents are standard markdown plus a handful of inline
//! extensions (struck-out text, alert and warning markers, colored spans,
//! dash-line rules). Rendering runs three stages in a fixed order:
//!
//! 1. **Pre-pass** ([`resolve_extensions`]): ordered [`EXTENSION_RULES`]
//!    rewrite extension syntax into literal HTML. Code spans and fenced code
//!    blocks are shielded from the rules.
//! 2. **Base renderer** ([`Renderer`]): standard markdown goes through
//!    pulldown-cmark ([`CmarkRenderer`]) with tables, footnotes, definition
//!    lists, hard breaks and smart punctuation.
//! 3. **Post-pass** ([`restyle_blocks`]): blockquotes are restyled with
//!    inline presentation attributes.
//!
//! A renderer failure never escapes [`render_document`]: the document is
//! replaced by a red [`error_fragment`].
//!
//! # Example
//!
//! ```
//! use doctus_renderer::render_document;
//!
//! let html = render_document("~~gone~~ and @#1a2b3c@hex@end@");
//! assert!(html.contains(r#"<span style="text-decoration:line-through;">gone</span>"#));
//! assert!(html.contains(r#"<span style="color:#1a2b3c;">hex</span>"#));
//! ```

mod extension;
mod fence;
mod pipeline;
mod renderer;
mod restyle;
mod sample;
mod shield;
mod util;

pub use extension::{EXTENSION_RULES, ExtensionRule, resolve_extensions, rule};
pub use pipeline::{Pipeline, error_fragment, export_html, render_document};
pub use renderer::{CmarkRenderer, RenderError, RenderOutcome, Renderer};
pub use restyle::restyle_blocks;
pub use sample::SAMPLE_DOCUMENT;
pub use util::escape_html;
