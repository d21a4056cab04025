//! Shielding of code regions from the extension rules.
//!
//! Fenced code blocks and backtick code spans belong to the base renderer's
//! grammar. They are swapped for placeholder tokens before the extension
//! rules run and restored verbatim afterwards, so `~~`, `!!` and friends
//! inside code reach the renderer untouched.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::fence::FenceTracker;

/// Placeholder delimiters. Unicode noncharacters never appear in real prose.
const OPEN: char = '\u{FDD0}';
const CLOSE: char = '\u{FDD1}';

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{FDD0}(\d+)\x{FDD1}").unwrap());

/// Markdown text with its code regions replaced by placeholders.
#[derive(Debug, Default)]
pub(crate) struct Shielded {
    text: String,
    regions: Vec<String>,
}

impl Shielded {
    /// Scan `input` and shield every fenced code block and code span.
    ///
    /// An unclosed fence runs to the end of the document, as in `CommonMark`.
    pub(crate) fn new(input: &str) -> Self {
        let mut shielded = Self {
            text: String::with_capacity(input.len()),
            regions: Vec::new(),
        };
        let mut fence = FenceTracker::new();
        let mut prose = String::new();
        let mut block = String::new();

        for line in input.split_inclusive('\n') {
            let was_in_fence = fence.in_fence();
            let is_marker = fence.update(line);

            match (was_in_fence, is_marker) {
                (false, false) => prose.push_str(line),
                (false, true) => {
                    shielded.shield_code_spans(&prose);
                    prose.clear();
                    block.push_str(line);
                }
                (true, false) => block.push_str(line),
                (true, true) => {
                    block.push_str(line);
                    shielded.shield_block(&block);
                    block.clear();
                }
            }
        }

        if !block.is_empty() {
            shielded.shield_block(&block);
        }
        shielded.shield_code_spans(&prose);
        shielded
    }

    /// The shielded text the extension rules operate on.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Number of shielded regions.
    pub(crate) fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Put the shielded regions back into `text`.
    ///
    /// Placeholders with an unknown index are left as they are.
    pub(crate) fn restore(&self, text: &str) -> String {
        if self.regions.is_empty() {
            return text.to_owned();
        }
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.regions.get(index))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }

    fn push_region(&mut self, region: &str) {
        let index = self.regions.len();
        self.regions.push(region.to_owned());
        write!(self.text, "{OPEN}{index}{CLOSE}").unwrap();
    }

    /// Shield a whole fenced block, keeping its final line break outside the
    /// placeholder so the block still occupies its own lines.
    fn shield_block(&mut self, block: &str) {
        match block.strip_suffix('\n') {
            Some(body) => {
                self.push_region(body);
                self.text.push('\n');
            }
            None => self.push_region(block),
        }
    }

    /// Copy prose into the shielded text, replacing backtick code spans.
    fn shield_code_spans(&mut self, prose: &str) {
        let bytes = prose.as_bytes();
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'`' {
                i += 1;
                continue;
            }
            let run = backtick_run(bytes, i);
            if i > 0 && bytes[i - 1] == b'\\' {
                // Escaped backtick opens nothing; the rest of the run may.
                i += 1;
                continue;
            }
            let line_start = prose[..i].rfind('\n').map_or(0, |pos| pos + 1);
            let single_line = is_single_line_block(&bytes[line_start..]);
            if let Some(close) = find_closing_run(bytes, i + run, run, single_line) {
                let end = close + run;
                self.text.push_str(&prose[copied..i]);
                self.push_region(&prose[i..end]);
                copied = end;
                i = end;
            } else {
                i += run;
            }
        }
        self.text.push_str(&prose[copied..]);
    }
}

/// Length of the backtick run starting at `start`.
fn backtick_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|&&b| b == b'`').count()
}

/// Find a closing backtick run of exactly `len` after `from`.
///
/// Code spans stay inside their block: the search stops at a line that
/// starts a new block, or at the first line break when the opening line is
/// a block of its own (`single_line`).
fn find_closing_run(bytes: &[u8], from: usize, len: usize, single_line: bool) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'`' => {
                let run = backtick_run(bytes, j);
                if run == len {
                    return Some(j);
                }
                j += run;
            }
            b'\n' if single_line || starts_new_block(&bytes[j + 1..]) => return None,
            _ => j += 1,
        }
    }
    None
}

/// Strip up to three columns of indentation. `None` for indented code.
fn block_start(line: &[u8]) -> Option<&[u8]> {
    let indent = line.iter().take_while(|&&b| b == b' ').count();
    (indent < 4).then(|| &line[indent..])
}

/// First line of `rest`, without its line break.
fn first_line(rest: &[u8]) -> &[u8] {
    rest.split(|&b| b == b'\n').next().unwrap_or_default()
}

/// Blocks that never continue on the next line: ATX headings and table rows.
fn is_single_line_block(rest: &[u8]) -> bool {
    block_start(first_line(rest))
        .is_some_and(|line| is_atx_heading(line) || line.first() == Some(&b'|'))
}

/// Whether the line at the start of `rest` interrupts a paragraph.
///
/// Fences are not checked here: fence lines never reach the span scanner.
fn starts_new_block(rest: &[u8]) -> bool {
    let line = first_line(rest);
    if line.iter().all(|&b| b == b' ' || b == b'\t' || b == b'\r') {
        return true;
    }
    let Some(line) = block_start(line) else {
        return false;
    };
    match line[0] {
        b'#' => is_atx_heading(line),
        b'>' => true,
        b'=' => is_marker_line(line, b'=', 1),
        b'-' => is_marker_line(line, b'-', 1) || is_list_marker(&line[1..]),
        b'*' => is_marker_line(line, b'*', 3) || is_list_marker(&line[1..]),
        b'+' => is_list_marker(&line[1..]),
        b'_' => is_marker_line(line, b'_', 3),
        b'0'..=b'9' => {
            let digits = line.iter().take_while(|b| b.is_ascii_digit()).count();
            digits <= 9
                && matches!(line.get(digits), Some(b'.' | b')'))
                && is_list_marker(&line[digits + 1..])
        }
        _ => false,
    }
}

/// `#` to `######` followed by a space or the end of the line.
fn is_atx_heading(line: &[u8]) -> bool {
    let hashes = line.iter().take_while(|&&b| b == b'#').count();
    (1..=6).contains(&hashes) && matches!(line.get(hashes), None | Some(b' ' | b'\t' | b'\r'))
}

/// What follows a bullet or ordered list marker: a space or the line end.
fn is_list_marker(after: &[u8]) -> bool {
    matches!(after.first(), None | Some(b' ' | b'\t' | b'\r'))
}

/// A setext underline or thematic break made of `marker`.
fn is_marker_line(line: &[u8], marker: u8, min: usize) -> bool {
    let mut count = 0;
    for &b in line {
        match b {
            _ if b == marker => count += 1,
            b' ' | b'\t' | b'\r' => {}
            _ => return false,
        }
    }
    count >= min
}
