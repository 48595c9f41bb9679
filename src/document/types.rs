//! Core document types.

use std::ops::Range;

/// One structural unit of a parsed markdown document.
///
/// Elements are produced in source order, own their extracted strings, and
/// are immutable after parsing. Rendering dispatches on the variant with an
/// exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownElement {
    /// A heading line: `#` through `######` followed by whitespace and text.
    Heading {
        /// Heading level (1-6), the number of leading `#` characters.
        level: u8,
        /// Trimmed heading text.
        text: String,
    },
    /// A plain text line with inline styling spans.
    Text {
        /// The raw line, delimiters included.
        text: String,
        /// Inline style annotations over byte ranges of `text`.
        ///
        /// Spans may overlap; rendering applies them positionally in the
        /// order recorded (all bold spans, then italic, then code).
        spans: Vec<Span>,
    },
    /// A block of consecutive table rows.
    Table {
        /// Row-major cells. The first row is conventionally a header row;
        /// column counts are not validated across rows.
        rows: Vec<Vec<String>>,
    },
    /// An image reference: `![alt](url)`.
    Image {
        /// Alt text from the brackets.
        alt_text: String,
        /// Source URL from the parentheses.
        url: String,
    },
}

/// Inline style kind for a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Bold,
    Italic,
    Code,
}

/// A (style, range) annotation over a text element.
///
/// The range is in byte offsets into the owning element's text. Delimiters
/// (`**`, `*`, backticks) are part of the range; they are de-emphasized by
/// styling, not stripped from the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub range: Range<usize>,
}

impl Span {
    pub const fn new(kind: SpanKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }
}

/// A parsed markdown document: the source text plus its element sequence.
#[derive(Debug, Clone, Default)]
pub struct Document {
    source: String,
    elements: Vec<MarkdownElement>,
}

impl Document {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse markdown source into a document.
    pub fn parse(source: &str) -> Self {
        Self {
            source: source.to_string(),
            elements: super::parser::parse(source),
        }
    }

    /// The original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed elements in source order.
    pub fn elements(&self) -> &[MarkdownElement] {
        &self.elements
    }

    /// Number of parsed elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// URLs of all image elements, in document order.
    pub fn image_urls(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|el| match el {
                MarkdownElement::Image { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True if any element references the given image URL.
    pub fn references_image(&self, url: &str) -> bool {
        self.elements
            .iter()
            .any(|el| matches!(el, MarkdownElement::Image { url: u, .. } if u == url))
    }
}
