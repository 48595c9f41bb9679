//! Lightweight editor module for in-place markdown editing.
//!
//! Provides a rope-backed text buffer with cursor, selection, and
//! delimiter-wrapping operations, designed for integration into the TEA
//! architecture. Saving hands the buffer text back to the parser.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};

/// Inline markdown style applied by wrapping a selection in delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStyle {
    Bold,
    Italic,
    Code,
}

impl WrapStyle {
    /// The delimiter inserted on each side of the wrapped text.
    pub const fn delimiter(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "*",
            Self::Code => "`",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_style_delimiters() {
        assert_eq!(WrapStyle::Bold.delimiter(), "**");
        assert_eq!(WrapStyle::Italic.delimiter(), "*");
        assert_eq!(WrapStyle::Code.delimiter(), "`");
    }
}
