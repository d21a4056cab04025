//! Standalone HTML page wrapper.

use std::fmt::Write;
use std::path::Path;

use doctus_config::{OutputConfig, Theme};
use doctus_renderer::escape_html;

/// Page title used when the document has no file name.
const DEFAULT_TITLE: &str = "Doctus";

/// Finish a rendered fragment according to the output settings.
///
/// Returns the fragment as is, or wrapped into a complete page when
/// standalone output is enabled.
pub(crate) fn finish(fragment: String, config: &OutputConfig, input: Option<&Path>) -> String {
    if config.standalone {
        standalone_page(&page_title(input), &fragment, config.theme, config.font_size)
    } else {
        fragment
    }
}

/// Title for a page rendered from `input`: the file stem, or "Doctus".
pub(crate) fn page_title(input: Option<&Path>) -> String {
    input
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned())
}

/// Wrap an HTML fragment into a complete UTF-8 page.
pub(crate) fn standalone_page(title: &str, body: &str, theme: Theme, font_size: u8) -> String {
    let (background, foreground) = theme.colors();
    let code_background = match theme {
        Theme::Light => "#f4f4f4",
        Theme::Dark => "#2b2b2b",
    };

    let mut page = String::with_capacity(body.len() + 1024);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(page, "<title>{}</title>", escape_html(title)).unwrap();
    page.push_str("<style>\n");
    writeln!(
        page,
        "body {{ font-family: sans-serif; font-size: {font_size}px; line-height: 1.5; \
         background: {background}; color: {foreground}; max-width: 50em; \
         margin: 0 auto; padding: 1em 2em; }}"
    )
    .unwrap();
    writeln!(
        page,
        "pre, code {{ background: {code_background}; border-radius: 3px; }}"
    )
    .unwrap();
    page.push_str("pre { padding: 0.6em; overflow-x: auto; }\n");
    page.push_str("table { border-collapse: collapse; }\n");
    page.push_str("th, td { border: 1px solid #999; padding: 0.25em 0.6em; }\n");
    page.push_str("blockquote { margin: 1em 0; }\n");
    page.push_str("</style>\n</head>\n<body>\n");
    page.push_str(body);
    if !body.ends_with('\n') {
        page.push('\n');
    }
    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_title_from_stem() {
        assert_eq!(page_title(Some(Path::new("docs/release-notes.md"))), "release-notes");
    }

    #[test]
    fn test_page_title_default() {
        assert_eq!(page_title(None), "Doctus");
        assert_eq!(page_title(Some(Path::new("/"))), "Doctus");
    }

    #[test]
    fn test_standalone_page_structure() {
        let page = standalone_page("notes", "<p>hi</p>\n", Theme::Light, 15);
        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<title>notes</title>"));
        assert!(page.contains("font-size: 15px"));
        assert!(page.contains("<body>\n<p>hi</p>\n</body>"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn test_standalone_page_escapes_title() {
        let page = standalone_page("a<b>&c", "", Theme::Light, 15);
        assert!(page.contains("<title>a&lt;b&gt;&amp;c</title>"));
    }

    #[test]
    fn test_standalone_page_theme_colors() {
        let light = standalone_page("t", "", Theme::Light, 15);
        let dark = standalone_page("t", "", Theme::Dark, 15);
        assert!(light.contains("background: #ffffff"));
        assert!(dark.contains("background: #1e1e1e"));
        assert!(dark.contains("color: #e6e6e6"));
    }

    #[test]
    fn test_finish_fragment_passthrough() {
        let config = OutputConfig::default();
        assert_eq!(finish("<p>x</p>\n".to_owned(), &config, None), "<p>x</p>\n");
    }

    #[test]
    fn test_finish_standalone() {
        let config = OutputConfig {
            standalone: true,
            theme: Theme::Dark,
            font_size: 20,
        };
        let page = finish("<p>x</p>\n".to_owned(), &config, Some(Path::new("a.md")));
        assert!(page.contains("<title>a</title>"));
        assert!(page.contains("font-size: 20px"));
    }
}
