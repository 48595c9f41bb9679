//! Theming and color definitions.
//!
//! Uses semantic ANSI colors that respect the terminal's palette rather
//! than hard-coded RGB values.

use ratatui::style::{Color, Modifier, Style};

use super::layout::{Row, RowKind, StyledSpan};

/// Base style for a display row kind.
pub fn style_for_row_kind(kind: RowKind) -> Style {
    match kind {
        RowKind::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        RowKind::Heading(2) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        RowKind::Heading(3) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        RowKind::Heading(4) => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        RowKind::Heading(5) => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        RowKind::Heading(_) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),

        // The conventional header row of a table is bolded.
        RowKind::TableHeader => Style::default().add_modifier(Modifier::BOLD),

        // Image placeholders stand out until the image is drawn over them.
        RowKind::Image => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::ITALIC),

        RowKind::Text | RowKind::TableRow | RowKind::Blank => Style::default(),
    }
}

/// Style for an inline run, merged with the row's base style.
pub fn style_for_span(base: Style, span: &StyledSpan) -> Style {
    let mut style = base;
    if span.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if span.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if span.code {
        style = style.fg(Color::Indexed(245)).add_modifier(Modifier::DIM);
    }
    style
}

/// Convert a display row into a ratatui line.
pub fn line_for_row(row: &Row) -> ratatui::text::Line<'static> {
    let base = style_for_row_kind(row.kind);
    let spans: Vec<ratatui::text::Span<'static>> = row
        .spans
        .iter()
        .map(|span| ratatui::text::Span::styled(span.text.clone(), style_for_span(base, span)))
        .collect();
    ratatui::text::Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_are_bold() {
        for level in 1..=6 {
            let style = style_for_row_kind(RowKind::Heading(level));
            assert!(
                style.add_modifier.contains(Modifier::BOLD),
                "heading {level} should be bold"
            );
        }
    }

    #[test]
    fn test_table_header_is_bold_and_rows_are_not() {
        assert!(
            style_for_row_kind(RowKind::TableHeader)
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert!(
            !style_for_row_kind(RowKind::TableRow)
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }

    #[test]
    fn test_span_styles_stack_on_base() {
        let span = StyledSpan {
            text: "x".to_string(),
            bold: true,
            italic: true,
            code: false,
        };
        let style = style_for_span(Style::default(), &span);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
    }
}
