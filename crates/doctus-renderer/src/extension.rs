//! Pre-pass extension resolver.
//!
//! Rewrites Doctus inline syntax into literal HTML before the base renderer
//! sees the text:
//!
//! | syntax                  | result                                   |
//! |-------------------------|------------------------------------------|
//! | `~~text~~`              | line-through span                        |
//! | `!!text!!`              | red alert span with a warning glyph      |
//! | `&&text&&`              | amber warning span with a warning glyph  |
//! | `---` on its own line   | `<hr>`                                   |
//! | `@name@text@end@`       | span colored with a CSS color keyword    |
//! | `@#1a2b3c@text@end@`    | span colored with a 3 or 6 digit hex     |
//!
//! Unterminated markers stay literal. Fenced code blocks and code spans are
//! never rewritten.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::shield::Shielded;

/// A single rewrite rule: a pattern with capture groups and an HTML
/// replacement template referring to the groups as `${1}`, `${2}`.
#[derive(Debug)]
pub struct ExtensionRule {
    /// Short identifier used in logs and tests.
    pub name: &'static str,
    /// Regular expression matched against the whole document.
    pub pattern: &'static str,
    /// Replacement template in `regex` expansion syntax.
    pub replacement: &'static str,
    /// Decides whether a match at its position in the text is rewritten.
    /// A rejected match is retried one character further on.
    accepts: fn(&str, &Captures<'_>) -> bool,
    compiled: OnceLock<Regex>,
}

impl ExtensionRule {
    const fn new(name: &'static str, pattern: &'static str, replacement: &'static str) -> Self {
        Self::accepting(name, pattern, replacement, accepts_all)
    }

    const fn accepting(
        name: &'static str,
        pattern: &'static str,
        replacement: &'static str,
        accepts: fn(&str, &Captures<'_>) -> bool,
    ) -> Self {
        Self {
            name,
            pattern,
            replacement,
            accepts,
            compiled: OnceLock::new(),
        }
    }

    /// The compiled pattern.
    pub fn regex(&self) -> &Regex {
        self.compiled
            .get_or_init(|| Regex::new(self.pattern).unwrap())
    }

    /// Apply this rule to every match in `text`.
    ///
    /// Captured text is inserted literally; a `$` inside it is not expanded.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let regex = self.regex();
        let mut output = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;

        while let Some(caps) = regex.captures_at(text, pos) {
            let Some(whole) = caps.get(0) else { break };
            if whole.is_empty() || !(self.accepts)(text, &caps) {
                let skipped = text[whole.start()..].chars().next().map_or(1, char::len_utf8);
                pos = whole.start() + skipped;
                continue;
            }
            output.push_str(&text[copied..whole.start()]);
            caps.expand(self.replacement, &mut output);
            copied = whole.end();
            pos = whole.end();
        }
        output.push_str(&text[copied..]);
        output
    }
}

fn accepts_all(_: &str, _: &Captures<'_>) -> bool {
    true
}

/// Rejects `@end@` as a color and a match whose opening `@` closes a hex
/// token, as in `@#123456@abc@end@`: that item belongs to the hex rule.
fn accepts_named_color(text: &str, caps: &Captures<'_>) -> bool {
    let start = caps.get(0).map_or(0, |m| m.start());
    &caps[1] != "end" && !ends_with_hex_token(&text[..start])
}

/// Whether `before` ends with `@#` and three or six hex digits.
fn ends_with_hex_token(before: &str) -> bool {
    let digits = before
        .bytes()
        .rev()
        .take_while(u8::is_ascii_hexdigit)
        .count();
    matches!(digits, 3 | 6) && before[..before.len() - digits].ends_with("@#")
}

/// Extension rules in application order.
///
/// Each rule runs over the whole document before the next one starts. The
/// marker rules come first so that color spans can wrap the spans they
/// emit. The named and hex color rules own disjoint tokens (`#` is not a
/// letter); their order is fixed anyway.
pub static EXTENSION_RULES: [ExtensionRule; 6] = [
    ExtensionRule::new(
        "strikethrough",
        r"~~(.*?)~~",
        r#"<span style="text-decoration:line-through;">${1}</span>"#,
    ),
    ExtensionRule::new(
        "alert",
        r"!!(.*?)!!",
        r#"<span style="color:#E62727; font-weight:bold; background:#fff2cf; border-radius:3px;">&#9888; ${1}</span>"#,
    ),
    ExtensionRule::new(
        "warning",
        r"&&(.*?)&&",
        r#"<span style="color:#FFB200; font-weight:bold; background:#fff2cf; border-radius:3px;">&#9888; ${1}</span>"#,
    ),
    // Spaces and tabs only: `\s` would swallow neighbouring blank lines.
    // The trailing newline closes the HTML block for the base renderer.
    ExtensionRule::new("horizontal-rule", r"(?m)^[ \t]*-{3,}[ \t]*$", "<hr>\n"),
    ExtensionRule::accepting(
        "named-color",
        r"@([a-zA-Z]+)@(.+?)@end@",
        r#"<span style="color:${1};">${2}</span>"#,
        accepts_named_color,
    ),
    ExtensionRule::new(
        "hex-color",
        r"@(#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}))@(.+?)@end@",
        r#"<span style="color:${1};">${2}</span>"#,
    ),
];

/// Look up a rule by name.
#[must_use]
pub fn rule(name: &str) -> Option<&'static ExtensionRule> {
    EXTENSION_RULES.iter().find(|rule| rule.name == name)
}

/// Resolve all extension syntax in `text` into literal HTML.
///
/// Total: text that does not match a rule is returned unchanged.
///
/// # Example
///
/// ```
/// use doctus_renderer::resolve_extensions;
///
/// let html = resolve_extensions("@red@stop@end@ and `@red@code@end@`");
/// assert_eq!(
///     html,
///     r#"<span style="color:red;">stop</span> and `@red@code@end@`"#
/// );
/// ```
#[must_use]
pub fn resolve_extensions(text: &str) -> String {
    let shielded = Shielded::new(text);
    let mut output = shielded.text().to_owned();
    for rule in &EXTENSION_RULES {
        output = rule.apply(&output);
    }
    tracing::debug!(
        input_len = text.len(),
        shielded_regions = shielded.region_count(),
        "Resolved extension rules"
    );
    shielded.restore(&output)
}
