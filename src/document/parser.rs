//! Line-oriented markdown parsing.
//!
//! A single left-to-right pass over the input classifies each line as a
//! heading, table row, image, or plain text. The only state carried across
//! lines is whether a table block is being accumulated. The parser never
//! fails: anything unrecognized degrades to a [`MarkdownElement::Text`].
//!
//! This is deliberately not CommonMark. Nested constructs (lists, block
//! quotes, nested emphasis) are out of scope, and several observed quirks of
//! the behavior this parser reproduces are kept as-is:
//! - the italic pattern also fires on the bare `*` characters inside a
//!   `**bold**` run, so bold text usually carries overlapping italic spans;
//! - while a table is open, a non-blank line that is not a table row is
//!   still appended through the row parser;
//! - a table still open at end of input is dropped, not flushed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{MarkdownElement, Span, SpanKind};

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s(.*)").unwrap());
static TABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|(.+)\|$").unwrap());
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-+$").unwrap());

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());

/// Parse markdown text into an ordered element sequence.
///
/// Classification is tried per line in a fixed priority order: heading,
/// table row, table termination (blank line while a table is open), image,
/// then plain text. The element sequence preserves source line order and its
/// length never exceeds the number of input lines.
pub fn parse(text: &str) -> Vec<MarkdownElement> {
    let mut elements = Vec::new();

    let mut in_table = false;
    let mut table_rows: Vec<Vec<String>> = Vec::new();

    for line in text.split('\n') {
        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps[1].len() as u8;
            elements.push(MarkdownElement::Heading {
                level,
                text: caps[2].trim().to_string(),
            });
        } else if TABLE_RE.is_match(line) {
            in_table = true;
            push_table_row(&mut table_rows, line);
        } else if in_table && line.trim().is_empty() {
            in_table = false;
            elements.push(MarkdownElement::Table {
                rows: std::mem::take(&mut table_rows),
            });
        } else if let Some(caps) = IMAGE_RE.captures(line) {
            // Only the first image markup on a line is captured; the rest of
            // the line is dropped.
            elements.push(MarkdownElement::Image {
                alt_text: caps[1].to_string(),
                url: caps[2].to_string(),
            });
        } else if in_table {
            // A non-blank, non-table line inside an open table block is
            // swallowed into the table through the row parser.
            push_table_row(&mut table_rows, line);
        } else {
            elements.push(MarkdownElement::Text {
                spans: scan_inline_spans(line),
                text: line.to_string(),
            });
        }
    }

    // A table still open here is dropped along with its accumulated rows.
    elements
}

/// Split a table line on `|`, trimming cells and dropping empty pieces and
/// header-separator pieces (`---`). Rows that end up empty (e.g. the
/// separator line itself) are not accumulated.
fn push_table_row(rows: &mut Vec<Vec<String>>, line: &str) {
    let cells: Vec<String> = line
        .split('|')
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && !SEPARATOR_RE.is_match(piece))
        .map(ToOwned::to_owned)
        .collect();
    if !cells.is_empty() {
        rows.push(cells);
    }
}

/// Scan a line for inline styling, one independent pass per pattern.
///
/// Each pattern records all of its non-overlapping matches; the patterns are
/// not exclusive of each other, so ranges from different patterns can
/// overlap. Spans come out in pattern order (bold, italic, code), each
/// pattern's matches left to right.
fn scan_inline_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    for (kind, re) in [
        (SpanKind::Bold, &*BOLD_RE),
        (SpanKind::Italic, &*ITALIC_RE),
        (SpanKind::Code, &*CODE_RE),
    ] {
        for m in re.find_iter(line) {
            spans.push(Span::new(kind, m.range()));
        }
    }
    spans
}
