use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::app::{App, Message, Model};
use crate::editor::{Direction, WrapStyle};

/// Rows scrolled per mouse wheel tick.
const WHEEL_SCROLL_ROWS: usize = 3;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if model.editor_mode {
                    handle_editor_key(key)
                } else {
                    handle_view_key(key)
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_SCROLL_ROWS)),
                MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_SCROLL_ROWS)),
                _ => None,
            },
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }
}

fn handle_view_key(key: &KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::Quit)
        }

        KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollUp(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollDown(1)),
        KeyCode::PageUp | KeyCode::Char('b') => Some(Message::PageUp),
        KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => Some(Message::PageDown),
        KeyCode::Char('u') => Some(Message::HalfPageUp),
        KeyCode::Char('d') => Some(Message::HalfPageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::End | KeyCode::Char('G') => Some(Message::GoToBottom),

        KeyCode::Char('e') => Some(Message::EnterEditMode),
        _ => None,
    }
}

fn handle_editor_key(key: &KeyEvent) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Esc => Some(Message::ExitEditMode),

        // Inline style wrapping, mirroring the viewer's toolbar actions.
        KeyCode::Char('b') if ctrl => Some(Message::EditorWrap(WrapStyle::Bold)),
        KeyCode::Char('e') if ctrl => Some(Message::EditorWrap(WrapStyle::Italic)),
        KeyCode::Char('k') if ctrl => Some(Message::EditorWrap(WrapStyle::Code)),

        KeyCode::Char('s') if ctrl => Some(Message::EditorSave),

        KeyCode::Up if shift => Some(Message::EditorSelectMove(Direction::Up)),
        KeyCode::Down if shift => Some(Message::EditorSelectMove(Direction::Down)),
        KeyCode::Left if shift => Some(Message::EditorSelectMove(Direction::Left)),
        KeyCode::Right if shift => Some(Message::EditorSelectMove(Direction::Right)),

        KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
        KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),

        KeyCode::Home if ctrl => Some(Message::EditorMoveToStart),
        KeyCode::End if ctrl => Some(Message::EditorMoveToEnd),
        KeyCode::Home => Some(Message::EditorMoveHome),
        KeyCode::End => Some(Message::EditorMoveEnd),

        KeyCode::Enter => Some(Message::EditorSplitLine),
        KeyCode::Backspace => Some(Message::EditorDeleteBack),
        KeyCode::Delete => Some(Message::EditorDeleteForward),

        KeyCode::Char(ch) if !ctrl => Some(Message::EditorInsertChar(ch)),
        _ => None,
    }
}
