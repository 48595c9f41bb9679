//! Document layout: turning parsed elements into styled display rows.
//!
//! The parser produces structural elements; this module is the rendering
//! side of that contract. Each element expands into one or more display
//! rows: headings become a single styled row, text wraps to the content
//! width with its inline spans preserved, tables align their columns with a
//! header row, and images reserve a block of rows that the renderer draws
//! the decoded image over once it is available.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::document::{MarkdownElement, Span, SpanKind};

/// Display rows reserved for each inline image.
pub const IMAGE_ROWS: usize = 12;

/// Gap between table columns, in spaces.
const TABLE_COLUMN_GAP: usize = 2;

const BOLD: u8 = 1;
const ITALIC: u8 = 1 << 1;
const CODE: u8 = 1 << 2;

/// Kind of a display row, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Heading with level (1-6)
    Heading(u8),
    /// Wrapped text line
    Text,
    /// First row of a table (rendered bold)
    TableHeader,
    /// Subsequent table row
    TableRow,
    /// Row reserved for an inline image
    Image,
    /// Empty spacer row
    Blank,
}

/// A run of text with resolved inline styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl StyledSpan {
    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    const fn from_flags(text: String, flags: u8) -> Self {
        Self {
            text,
            bold: flags & BOLD != 0,
            italic: flags & ITALIC != 0,
            code: flags & CODE != 0,
        }
    }
}

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub spans: Vec<StyledSpan>,
}

impl Row {
    fn blank() -> Self {
        Self {
            kind: RowKind::Blank,
            spans: Vec::new(),
        }
    }

    fn single(kind: RowKind, text: String) -> Self {
        Self {
            kind,
            spans: vec![StyledSpan::plain(text)],
        }
    }

    /// The row's text content with styling stripped.
    pub fn content(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A block of rows reserved for one image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub url: String,
    pub alt_text: String,
    /// Row indices the image may draw over.
    pub rows: Range<usize>,
}

/// The laid-out document: display rows plus image placement.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    pub rows: Vec<Row>,
    pub images: Vec<ImageSlot>,
}

impl DocumentLayout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Lay out elements for a content area `width` columns wide.
pub fn layout(elements: &[MarkdownElement], width: u16) -> DocumentLayout {
    let width = (width as usize).max(1);
    let mut rows: Vec<Row> = Vec::new();
    let mut images = Vec::new();

    for element in elements {
        match element {
            MarkdownElement::Heading { level, text } => {
                let prefix = "#".repeat(usize::from(*level));
                rows.push(Row::single(
                    RowKind::Heading(*level),
                    format!("{prefix} {text}"),
                ));
                rows.push(Row::blank());
            }
            MarkdownElement::Text { text, spans } => {
                if text.trim().is_empty() {
                    rows.push(Row::blank());
                } else {
                    let flags = style_flags(text, spans);
                    for range in wrap_ranges(text, width) {
                        rows.push(Row {
                            kind: RowKind::Text,
                            spans: spans_from_flags(&text[range.clone()], &flags[range]),
                        });
                    }
                }
            }
            MarkdownElement::Table { rows: cells } => {
                let widths = column_widths(cells);
                for (i, row_cells) in cells.iter().enumerate() {
                    let kind = if i == 0 {
                        RowKind::TableHeader
                    } else {
                        RowKind::TableRow
                    };
                    rows.push(Row::single(kind, format_table_row(row_cells, &widths)));
                }
                rows.push(Row::blank());
            }
            MarkdownElement::Image { alt_text, url } => {
                let start = rows.len();
                let label = if alt_text.is_empty() { url } else { alt_text };
                rows.push(Row::single(RowKind::Image, format!("[Image: {label}]")));
                for _ in 1..IMAGE_ROWS {
                    rows.push(Row {
                        kind: RowKind::Image,
                        spans: Vec::new(),
                    });
                }
                images.push(ImageSlot {
                    url: url.clone(),
                    alt_text: alt_text.clone(),
                    rows: start..rows.len(),
                });
                rows.push(Row::blank());
            }
        }
    }

    DocumentLayout { rows, images }
}

/// Per-byte style bitmask from the element's spans.
///
/// Overlapping spans simply OR together, which is what makes the parser's
/// overlapping bold/italic ranges harmless at render time.
fn style_flags(text: &str, spans: &[Span]) -> Vec<u8> {
    let mut flags = vec![0u8; text.len()];
    for span in spans {
        let bit = match span.kind {
            SpanKind::Bold => BOLD,
            SpanKind::Italic => ITALIC,
            SpanKind::Code => CODE,
        };
        let start = span.range.start.min(text.len());
        let end = span.range.end.min(text.len());
        for flag in &mut flags[start..end] {
            *flag |= bit;
        }
    }
    flags
}

/// Group consecutive bytes with equal style flags into styled runs.
fn spans_from_flags(text: &str, flags: &[u8]) -> Vec<StyledSpan> {
    let mut out: Vec<StyledSpan> = Vec::new();
    let mut last_flags: Option<u8> = None;
    for (i, ch) in text.char_indices() {
        let f = flags[i];
        match out.last_mut() {
            Some(span) if last_flags == Some(f) => span.text.push(ch),
            _ => {
                out.push(StyledSpan::from_flags(ch.to_string(), f));
                last_flags = Some(f);
            }
        }
    }
    out
}

/// Greedy word wrap by display width. Returns byte ranges of each display
/// line; the break-point space is consumed, not rendered.
fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0;
    let mut last_space: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if line_width + w > width && i > line_start {
            if let Some(space) = last_space.filter(|s| *s >= line_start) {
                ranges.push(line_start..space);
                line_start = space + 1;
                line_width = text[line_start..i].width() + w;
            } else {
                ranges.push(line_start..i);
                line_start = i;
                line_width = w;
            }
            last_space = None;
        } else {
            line_width += w;
        }
        if ch == ' ' {
            last_space = Some(i);
        }
    }
    ranges.push(line_start..text.len());
    ranges
}

/// Maximum display width per column across all rows.
fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let w = cell.width();
            if i >= widths.len() {
                widths.push(w);
            } else if w > widths[i] {
                widths[i] = w;
            }
        }
    }
    widths
}

/// Pad cells to their column width and join with a fixed gap. Rows shorter
/// than the widest row simply end early; column counts are not validated.
fn format_table_row(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str(&" ".repeat(TABLE_COLUMN_GAP));
        }
        out.push_str(cell);
        let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.width());
        // No padding after the last cell.
        if i + 1 < cells.len() {
            out.push_str(&" ".repeat(pad));
        }
    }
    out
}
