use ratatui::style::Modifier;

use crate::document::Document;
use crate::ui::layout::{self, IMAGE_ROWS, RowKind};
use crate::ui::style::{line_for_row, style_for_row_kind};

fn rows_for(source: &str, width: u16) -> layout::DocumentLayout {
    layout::layout(Document::parse(source).elements(), width)
}

#[test]
fn test_full_pipeline_heading_line_is_styled() {
    let l = rows_for("# Hello", 80);
    let line = line_for_row(&l.rows[0]);
    assert_eq!(line.spans.len(), 1);
    assert_eq!(line.spans[0].content, "# Hello");
    assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn test_full_pipeline_table_header_line_is_bold() {
    let l = rows_for("|h1|h2|\n|-|-|\n|a|b|\n\n", 80);
    let header = line_for_row(&l.rows[0]);
    let body = line_for_row(&l.rows[1]);
    assert!(header.spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert!(!body.spans[0].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn test_full_pipeline_overlapping_spans_render() {
    // Bold with the spurious inner italic resolves to multiple runs, none of
    // which lose the bold modifier.
    let l = rows_for("**bold**", 80);
    let line = line_for_row(&l.rows[0]);
    assert!(line.spans.len() > 1);
    for span in &line.spans {
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }
    assert!(
        line.spans
            .iter()
            .any(|s| s.style.add_modifier.contains(Modifier::ITALIC))
    );
}

#[test]
fn test_full_pipeline_image_block_shape() {
    let l = rows_for("before\n![alt](http://x/i.png)\nafter", 80);
    // Text row, image rows, blank, text row.
    assert_eq!(l.rows[0].kind, RowKind::Text);
    assert_eq!(l.rows[1].kind, RowKind::Image);
    assert_eq!(l.rows[1 + IMAGE_ROWS].kind, RowKind::Blank);
    assert_eq!(l.rows.last().unwrap().kind, RowKind::Text);
    assert_eq!(l.images[0].rows, 1..1 + IMAGE_ROWS);
}

#[test]
fn test_blank_row_renders_empty_line() {
    let l = rows_for("a\n\nb", 80);
    let line = line_for_row(&l.rows[1]);
    assert!(line.spans.is_empty());
}

#[test]
fn test_style_lookup_total_over_row_kinds() {
    // Every kind has a defined style; exercised mostly so new kinds cannot
    // be forgotten.
    for kind in [
        RowKind::Heading(1),
        RowKind::Heading(6),
        RowKind::Text,
        RowKind::TableHeader,
        RowKind::TableRow,
        RowKind::Image,
        RowKind::Blank,
    ] {
        let _ = style_for_row_kind(kind);
    }
}
