//! Property-based invariants for the rendering pipeline.
//!
//! 1. Rendering arbitrary Unicode never panics
//! 2. Balanced delimiters leave no raw delimiter pairs behind, across block
//!    starts, line breaks and stray backticks
//! 3. The pre-pass is idempotent on its own output
//! 4. Documents without extension syntax pass the pre-pass unchanged

use doctus_renderer::{render_document, resolve_extensions};
use proptest::prelude::*;

/// Text that contains no extension delimiter characters.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.]{1,12}"
}

/// Color token of either family. `end` is the terminator, not a color.
fn color_token() -> impl Strategy<Value = String> {
    let named = "[a-zA-Z]{1,10}".prop_filter("terminator", |c| c != "end");
    let hex = (0u32..0x0100_0000).prop_map(|v| format!("#{v:06x}"));
    let short_hex = (0u32..0x1000).prop_map(|v| format!("#{v:03X}"));
    prop_oneof![named, hex, short_hex]
}

fn marker_item() -> impl Strategy<Value = String> {
    prop_oneof![
        plain_text().prop_map(|t| format!("~~{t}~~")),
        plain_text().prop_map(|t| format!("!!{t}!!")),
        plain_text().prop_map(|t| format!("&&{t}&&")),
    ]
}

/// One balanced extension item, possibly a marker nested in a color.
fn extension_item() -> impl Strategy<Value = String> {
    prop_oneof![
        marker_item(),
        (color_token(), plain_text()).prop_map(|(c, t)| format!("@{c}@{t}@end@")),
        (color_token(), marker_item()).prop_map(|(c, m)| format!("@{c}@{m}@end@")),
        plain_text(),
    ]
}

/// Block starts a line may open with; `\n` leaves a blank line before a
/// paragraph.
const LINE_PREFIXES: [&str; 7] = ["\n", "# ", "## ", "- ", "* ", "1. ", "> "];

/// One line of items, with at most one stray backtick.
fn document_line() -> impl Strategy<Value = String> {
    (
        prop::sample::select(LINE_PREFIXES.to_vec()),
        prop::collection::vec(extension_item(), 1..5),
        prop::option::of(0..5usize),
    )
        .prop_map(|(prefix, mut items, tick)| {
            if let Some(at) = tick {
                items.insert(at.min(items.len()), "`".to_owned());
            }
            format!("{prefix}{}", items.join(" "))
        })
}

/// Lines of balanced items, each opening its own block.
fn balanced_document() -> impl Strategy<Value = String> {
    prop::collection::vec(document_line(), 0..6).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn render_never_panics(source in any::<String>()) {
        let _ = render_document(&source);
    }

    #[test]
    fn rendered_balanced_document_has_no_markers(doc in balanced_document()) {
        let html = render_document(&doc);
        prop_assert!(!html.contains("~~"), "{html}");
        prop_assert!(!html.contains("!!"), "{html}");
        prop_assert!(!html.contains("@end@"), "{html}");
    }

    #[test]
    fn render_never_panics_on_delimiter_soup(source in "[~!&@#`>\\-a-f \n]{0,64}") {
        let _ = render_document(&source);
    }

    #[test]
    fn balanced_delimiters_are_consumed(doc in balanced_document()) {
        let out = resolve_extensions(&doc);
        prop_assert!(!out.contains("~~"), "{out}");
        prop_assert!(!out.contains("!!"), "{out}");
        prop_assert!(!out.contains("&&"), "{out}");
        prop_assert!(!out.contains("@end@"), "{out}");
    }

    #[test]
    fn pre_pass_is_idempotent(doc in balanced_document()) {
        let once = resolve_extensions(&doc);
        prop_assert_eq!(resolve_extensions(&once), once);
    }

    #[test]
    fn plain_text_passes_unchanged(text in "[a-zA-Z0-9 ,.\n]{0,80}") {
        prop_assert_eq!(resolve_extensions(&text), text);
    }
}
