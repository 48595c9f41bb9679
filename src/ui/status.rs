use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let percent = model.viewport.scroll_percent();
    let row_info = format!(
        "Row {}/{}",
        model.viewport.offset() + 1,
        model.viewport.total_rows()
    );
    let images = model.layout.images.len();
    let image_info = if images > 0 {
        format!("  {images} image(s)")
    } else {
        String::new()
    };

    let status = format!(
        " {}  [{}%]  {}{}  e:edit  q:quit",
        model.title, percent, row_info, image_info
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => ("[info]", Style::default().bg(Color::DarkGray).fg(Color::White)),
        ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

pub fn render_editor_hint_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let dirty = model
        .editor
        .as_ref()
        .is_some_and(crate::editor::EditorBuffer::is_dirty);
    let marker = if dirty { " [modified]" } else { "" };
    let hint = format!(
        " editing {}{}  ^S:save  ^B:bold  ^E:italic  ^K:code  Esc:back",
        model.title, marker
    );
    let bar = Paragraph::new(hint).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}
