use image::DynamicImage;

use crate::app::{Model, ToastLevel};
use crate::editor::{Direction, WrapStyle};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and worker completions.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    /// Scroll up by n rows
    ScrollUp(usize),
    /// Scroll down by n rows
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half a page
    HalfPageUp,
    /// Scroll down half a page
    HalfPageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,

    // Editor
    /// Enter edit mode (load source into editor buffer)
    EnterEditMode,
    /// Exit edit mode (return to view mode, discarding the buffer)
    ExitEditMode,
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Extend the selection in a direction (Shift+arrow)
    EditorSelectMove(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,
    /// Wrap the selection (or cursor) in a style's delimiter pair
    EditorWrap(WrapStyle),
    /// Re-parse the buffer as the viewed document and return to view mode
    EditorSave,

    // Images
    /// A worker finished fetching an image
    ImageFetched {
        url: String,
        result: Result<DynamicImage, String>,
    },

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Side
/// effects (spawning fetches, terminal I/O) live in the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::EnterEditMode => model.enter_edit_mode(),
        Message::ExitEditMode => model.exit_edit_mode(),
        Message::EditorInsertChar(ch) => with_editor(&mut model, |ed| ed.insert_char(ch)),
        Message::EditorDeleteBack => with_editor(&mut model, |ed| {
            ed.delete_back();
        }),
        Message::EditorDeleteForward => with_editor(&mut model, |ed| {
            ed.delete_forward();
        }),
        Message::EditorSplitLine => with_editor(&mut model, crate::editor::EditorBuffer::split_line),
        Message::EditorMoveCursor(direction) => {
            with_editor(&mut model, |ed| ed.move_cursor(direction));
        }
        Message::EditorSelectMove(direction) => {
            with_editor(&mut model, |ed| ed.select_move(direction));
        }
        Message::EditorMoveHome => with_editor(&mut model, |ed| ed.move_home()),
        Message::EditorMoveEnd => with_editor(&mut model, crate::editor::EditorBuffer::move_end),
        Message::EditorMoveToStart => with_editor(&mut model, |ed| ed.move_to_start()),
        Message::EditorMoveToEnd => {
            with_editor(&mut model, crate::editor::EditorBuffer::move_to_end);
        }
        Message::EditorWrap(style) => {
            with_editor(&mut model, |ed| ed.wrap_selection(style.delimiter()));
        }
        Message::EditorSave => {
            if model.save_editor() {
                model.exit_edit_mode();
                model.show_toast(ToastLevel::Info, "Saved");
            }
        }

        Message::ImageFetched { url, result } => apply_image_fetched(&mut model, &url, result),

        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}

        Message::Quit => model.should_quit = true,
    }
    model
}

fn with_editor(model: &mut Model, f: impl FnOnce(&mut crate::editor::EditorBuffer)) {
    if let Some(editor) = &mut model.editor {
        f(editor);
    }
}

/// Apply a worker-thread fetch completion.
///
/// Results for URLs the current document no longer references are discarded;
/// that is the whole cancellation protocol for in-flight fetches.
fn apply_image_fetched(model: &mut Model, url: &str, result: Result<DynamicImage, String>) {
    if !model.document.references_image(url) {
        tracing::debug!(url, "discarding image result for replaced document");
        return;
    }
    match result {
        Ok(image) => model.set_image_ready(url, image),
        Err(message) => {
            model.set_image_failed(url, message.clone());
            model.show_toast(ToastLevel::Error, format!("Image failed: {message}"));
        }
    }
}
