//! Markdown document model and parsing.
//!
//! This module handles:
//! - Classifying source lines into structural elements
//! - Inline span detection for text styling
//! - The [`Document`] wrapper that owns the source and its elements

mod parser;
mod types;

pub use parser::parse;
pub use types::{Document, MarkdownElement, Span, SpanKind};
