use image::{DynamicImage, Rgba, RgbaImage};

use crate::app::{ImageState, Message, Model, ToastLevel, update};
use crate::document::{Document, MarkdownElement};
use crate::editor::{Direction, WrapStyle};
use crate::image::ImageCache;

fn model_for(source: &str) -> Model {
    Model::new(
        Document::parse(source),
        "test.md".to_string(),
        (80, 24),
        ImageCache::new(1024 * 1024),
    )
}

fn long_document() -> String {
    (0..200).map(|i| format!("line {i}\n")).collect()
}

fn test_image() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])))
}

// --- Navigation ---

#[test]
fn test_scroll_messages_move_viewport() {
    let model = model_for(&long_document());
    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.viewport.offset(), 5);
    let model = update(model, Message::ScrollUp(2));
    assert_eq!(model.viewport.offset(), 3);
}

#[test]
fn test_page_and_jump_messages() {
    let model = model_for(&long_document());
    let model = update(model, Message::PageDown);
    assert!(model.viewport.offset() > 0);
    let model = update(model, Message::GoToBottom);
    assert_eq!(model.viewport.scroll_percent(), 100);
    let model = update(model, Message::GoToTop);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_quit_sets_flag() {
    let model = update(model_for("hi"), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_resize_relayouts_document() {
    let long_line = "word ".repeat(40);
    let model = model_for(&long_line);
    let wide_rows = model.layout.row_count();
    let model = update(model, Message::Resize(30, 24));
    assert!(
        model.layout.row_count() > wide_rows,
        "narrower terminal should wrap into more rows"
    );
    assert_eq!(model.viewport.total_rows(), model.layout.row_count());
}

// --- Editor flow ---

#[test]
fn test_enter_and_exit_edit_mode() {
    let model = update(model_for("# Title"), Message::EnterEditMode);
    assert!(model.editor_mode);
    assert_eq!(model.editor.as_ref().unwrap().text(), "# Title");

    let model = update(model, Message::ExitEditMode);
    assert!(!model.editor_mode);
    assert!(model.editor.is_none());
}

#[test]
fn test_edit_wrap_and_save_reparses_document() {
    let mut model = update(model_for("hello"), Message::EnterEditMode);
    for _ in 0..5 {
        model = update(model, Message::EditorSelectMove(Direction::Right));
    }
    model = update(model, Message::EditorWrap(WrapStyle::Bold));
    model = update(model, Message::EditorSave);

    assert!(!model.editor_mode, "save returns to view mode");
    assert_eq!(model.document.source(), "**hello**");
    match &model.document.elements()[0] {
        MarkdownElement::Text { text, spans } => {
            assert_eq!(text, "**hello**");
            assert!(!spans.is_empty());
        }
        other => panic!("expected text element, got {other:?}"),
    }
    assert!(matches!(
        model.active_toast(),
        Some((_, ToastLevel::Info))
    ));
}

#[test]
fn test_editor_typing() {
    let mut model = update(model_for(""), Message::EnterEditMode);
    for ch in "# hi".chars() {
        model = update(model, Message::EditorInsertChar(ch));
    }
    model = update(model, Message::EditorSave);
    assert!(matches!(
        model.document.elements()[0],
        MarkdownElement::Heading { level: 1, .. }
    ));
}

#[test]
fn test_save_without_editor_is_noop() {
    let model = update(model_for("hi"), Message::EditorSave);
    assert!(!model.editor_mode);
    assert!(model.active_toast().is_none());
}

// --- Image completions ---

#[test]
fn test_image_fetched_marks_ready() {
    let model = model_for("![a](http://x/a.png)");
    let model = update(
        model,
        Message::ImageFetched {
            url: "http://x/a.png".to_string(),
            result: Ok(test_image()),
        },
    );
    assert!(matches!(
        model.images.get("http://x/a.png"),
        Some(ImageState::Ready(_))
    ));
}

#[test]
fn test_image_fetched_for_replaced_document_is_discarded() {
    // The document no longer references this URL; the late result is
    // ignored rather than resurrected.
    let model = model_for("no images here");
    let model = update(
        model,
        Message::ImageFetched {
            url: "http://x/gone.png".to_string(),
            result: Ok(test_image()),
        },
    );
    assert!(!model.images.contains_key("http://x/gone.png"));
}

#[test]
fn test_image_fetch_failure_sets_state_and_toast() {
    let model = model_for("![a](http://x/a.png)");
    let model = update(
        model,
        Message::ImageFetched {
            url: "http://x/a.png".to_string(),
            result: Err("connection timed out".to_string()),
        },
    );
    assert!(matches!(
        model.images.get("http://x/a.png"),
        Some(ImageState::Failed(_))
    ));
    assert!(matches!(
        model.active_toast(),
        Some((_, ToastLevel::Error))
    ));
}

#[test]
fn test_set_document_preserves_state_for_kept_urls() {
    let mut model = model_for("![a](http://x/a.png)\n![b](http://x/b.png)");
    model.set_image_ready("http://x/a.png", test_image());

    model.set_document(Document::parse("![a](http://x/a.png)"));
    assert!(matches!(
        model.images.get("http://x/a.png"),
        Some(ImageState::Ready(_))
    ));
    assert!(!model.images.contains_key("http://x/b.png"));
}

#[test]
fn test_pending_images_near_viewport_dedupes() {
    let model = model_for("![a](http://x/a.png)\n![a](http://x/a.png)");
    let pending = model.pending_images_near_viewport();
    assert_eq!(pending, vec!["http://x/a.png".to_string()]);
}

#[test]
fn test_loading_images_are_not_pending() {
    let mut model = model_for("![a](http://x/a.png)");
    model.mark_image_loading("http://x/a.png");
    assert!(model.pending_images_near_viewport().is_empty());
}

// --- Toasts ---

#[test]
fn test_toast_expiry() {
    let mut model = model_for("hi");
    model.show_toast(ToastLevel::Info, "hello");
    assert!(model.active_toast().is_some());

    let later = std::time::Instant::now() + std::time::Duration::from_secs(60);
    assert!(model.expire_toast(later));
    assert!(model.active_toast().is_none());
    // Second call has nothing to expire.
    assert!(!model.expire_toast(later));
}
