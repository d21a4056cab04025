//! Post-pass block restyler.
//!
//! Rewrites the base renderer's `<blockquote>` elements into a muted,
//! left-bordered block with a square marker and italic content.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Blockquote pairs, across line breaks. The first closing tag ends a match.
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<blockquote>(.*?)</blockquote>").unwrap());

const QUOTE_OPEN: &str = concat!(
    "<blockquote>",
    r#"<div style="color:#7A7A73; border-left:4px solid #bbb; margin:0.5em 0; padding:0.5em 0.8em 0.5em 0.5em;">"#,
    r#"<span style="font-size:1em;">&#9632; </span><i>"#,
);

const QUOTE_CLOSE: &str = "</i></div></blockquote>";

/// Restyle every blockquote in rendered HTML.
///
/// The quote's inner HTML is kept verbatim inside the italics wrapper. Other
/// elements, and unbalanced blockquote tags, are left as they are.
///
/// # Example
///
/// ```
/// use doctus_renderer::restyle_blocks;
///
/// let html = restyle_blocks("<blockquote>\n<p>note</p>\n</blockquote>\n");
/// assert!(html.contains("<i>\n<p>note</p>\n</i></div></blockquote>"));
/// ```
#[must_use]
pub fn restyle_blocks(html: &str) -> String {
    BLOCKQUOTE_RE
        .replace_all(html, |caps: &Captures| {
            format!("{QUOTE_OPEN}{}{QUOTE_CLOSE}", &caps[1])
        })
        .into_owned()
}
