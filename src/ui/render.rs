use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui_image::protocol::StatefulProtocolType;
use ratatui_image::{Resize, StatefulImage};
use unicode_width::UnicodeWidthStr;

use crate::app::{ImageState, Model};
use crate::editor::Cursor;

use super::{DOCUMENT_LEFT_PADDING, status, style};

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    if model.editor_mode {
        render_editor(model, frame, area);
        return;
    }

    let toast_active = model.active_toast().is_some();
    let footer_rows = (1 + u16::from(toast_active)).min(area.height);
    let doc_area = Rect {
        height: area.height - footer_rows,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height - footer_rows,
        height: 1,
        ..area
    };

    render_document(model, frame, doc_area);
    status::render_status_bar(model, frame, status_area);
    if toast_active && footer_rows > 1 {
        let toast_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        status::render_toast_bar(model, frame, toast_area);
    }
}

fn render_document(model: &mut Model, frame: &mut Frame, area: Rect) {
    let padding = DOCUMENT_LEFT_PADDING.min(area.width);
    let content_area = Rect {
        x: area.x + padding,
        width: area.width - padding,
        ..area
    };

    let range = model.viewport.visible_range();
    let lines: Vec<Line> = range
        .filter_map(|i| model.layout.rows.get(i))
        .map(style::line_for_row)
        .collect();
    frame.render_widget(Paragraph::new(lines), content_area);

    render_failed_placeholders(model, frame, content_area);
    render_images(model, frame, content_area);
}

/// Overwrite the placeholder line of images whose fetch failed.
fn render_failed_placeholders(model: &Model, frame: &mut Frame, doc_area: Rect) {
    let visible = model.viewport.visible_range();
    for slot in &model.layout.images {
        if !matches!(model.images.get(&slot.url), Some(ImageState::Failed(_))) {
            continue;
        }
        if !visible.contains(&slot.rows.start) {
            continue;
        }
        let label = if slot.alt_text.is_empty() {
            &slot.url
        } else {
            &slot.alt_text
        };
        let y = doc_area.y + (slot.rows.start - visible.start) as u16;
        let line_area = Rect {
            y,
            height: 1,
            ..doc_area
        };
        let text = Paragraph::new(format!("[image unavailable: {label}]"))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::DIM));
        frame.render_widget(text, line_area);
    }
}

/// Draw ready images over their reserved rows.
///
/// Each image renders into a temp buffer at its full reserved size, then the
/// rows overlapping the viewport are copied into the frame, so partially
/// scrolled images clip instead of jumping.
fn render_images(model: &mut Model, frame: &mut Frame, doc_area: Rect) {
    if model.image_protocols.is_empty() {
        return;
    }
    let vp_top = model.viewport.offset() as i32;
    let vp_bottom = vp_top + i32::from(doc_area.height);

    for slot in &model.layout.images {
        let Some(protocol) = model.image_protocols.get_mut(&slot.url) else {
            continue;
        };

        let img_top = slot.rows.start as i32;
        let img_bottom = slot.rows.end as i32;
        if img_bottom <= vp_top || img_top >= vp_bottom {
            continue;
        }

        let img_height = (img_bottom - img_top) as u16;
        let img_width = doc_area.width;
        if img_width == 0 || img_height == 0 {
            continue;
        }

        let rel_y = img_top - vp_top;
        let src_start = (-rel_y).max(0) as u16;
        let dst_y = doc_area.y + rel_y.max(0) as u16;
        let visible_rows = (img_bottom.min(vp_bottom) - img_top.max(vp_top)) as u16;
        if visible_rows == 0 {
            continue;
        }

        let temp_area = Rect::new(0, 0, img_width, img_height);
        let mut temp_buf = ratatui::buffer::Buffer::empty(temp_area);
        let resize = if matches!(protocol.protocol_type(), StatefulProtocolType::Halfblocks(_)) {
            // Nearest-neighbor causes strong color aliasing artifacts in
            // half-cell mode.
            Resize::Scale(Some(image::imageops::FilterType::CatmullRom))
        } else {
            Resize::Scale(None)
        };
        StatefulImage::default()
            .resize(resize)
            .render(temp_area, &mut temp_buf, protocol);

        let frame_buf = frame.buffer_mut();
        let max_cols = img_width.min(frame_buf.area.width.saturating_sub(doc_area.x));
        for row in 0..visible_rows {
            let src_row = src_start + row;
            let dst_row = dst_y + row;
            if src_row < img_height && dst_row < frame_buf.area.height {
                for col in 0..max_cols {
                    let src_cell = &temp_buf[(col, src_row)];
                    let dst_cell = &mut frame_buf[(doc_area.x + col, dst_row)];
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

fn render_editor(model: &mut Model, frame: &mut Frame, area: Rect) {
    if area.height < 2 {
        return;
    }
    let hint_area = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    let edit_area = Rect {
        height: area.height - 1,
        ..area
    };

    let Some(editor) = model.editor.as_ref() else {
        return;
    };

    // Keep the cursor inside the visible window.
    let height = edit_area.height as usize;
    let cursor = editor.cursor();
    if cursor.line < model.editor_scroll {
        model.editor_scroll = cursor.line;
    } else if cursor.line >= model.editor_scroll + height {
        model.editor_scroll = cursor.line + 1 - height;
    }

    let selection = editor.selection();
    let end = (model.editor_scroll + height).min(editor.line_count());
    let lines: Vec<Line> = (model.editor_scroll..end)
        .map(|idx| editor_line(&editor.line_at(idx).unwrap_or_default(), idx, selection))
        .collect();
    frame.render_widget(Paragraph::new(lines), edit_area);

    let cursor_row = (cursor.line - model.editor_scroll) as u16;
    let prefix_width = editor
        .line_at(cursor.line)
        .as_deref()
        .and_then(|line| line.get(..cursor.col))
        .map_or(0, UnicodeWidthStr::width) as u16;
    frame.set_cursor_position((
        edit_area.x + prefix_width.min(edit_area.width.saturating_sub(1)),
        edit_area.y + cursor_row,
    ));

    status::render_editor_hint_bar(model, frame, hint_area);
}

/// One editor line, with the selected byte range reversed.
fn editor_line(
    content: &str,
    line_idx: usize,
    selection: Option<(Cursor, Cursor)>,
) -> Line<'static> {
    let plain = || Line::raw(content.to_string());
    let Some((start, end)) = selection else {
        return plain();
    };
    if line_idx < start.line || line_idx > end.line {
        return plain();
    }
    let sel_from = if line_idx == start.line {
        start.col.min(content.len())
    } else {
        0
    };
    let sel_to = if line_idx == end.line {
        end.col.min(content.len())
    } else {
        content.len()
    };
    if sel_from >= sel_to {
        return plain();
    }
    Line::from(vec![
        Span::raw(content[..sel_from].to_string()),
        Span::styled(
            content[sel_from..sel_to].to_string(),
            Style::default().add_modifier(Modifier::REVERSED),
        ),
        Span::raw(content[sel_to..].to_string()),
    ])
}
