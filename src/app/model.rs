use std::collections::HashMap;
use std::time::{Duration, Instant};

use image::DynamicImage;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::document::Document;
use crate::editor::EditorBuffer;
use crate::image::ImageCache;
use crate::ui::DOCUMENT_LEFT_PADDING;
use crate::ui::layout::{self, DocumentLayout};
use crate::ui::viewport::Viewport;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Rows beyond the viewport for which image fetches start early, so images
/// are usually ready by the time they scroll into view.
const IMAGE_OVERSCAN_ROWS: usize = 40;

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Loading state of one image URL referenced by the current document.
#[derive(Debug)]
pub enum ImageState {
    /// Not requested yet.
    Pending,
    /// A worker fetch is in flight.
    Loading,
    /// Decoded and ready to draw.
    Ready(DynamicImage),
    /// Fetch or decode failed.
    Failed(String),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The image cache is
/// the one shared resource; it is injected by the application owner and
/// cloned into worker threads.
pub struct Model {
    /// The parsed markdown document
    pub document: Document,
    /// Display title (file name or URL)
    pub title: String,
    /// Viewport managing scroll position over the laid-out rows
    pub viewport: Viewport,
    /// The document laid out for the current content width
    pub layout: DocumentLayout,
    /// Process-wide image cache shared with worker threads
    pub cache: ImageCache,
    /// Per-URL image loading state for the current document
    pub images: HashMap<String, ImageState>,
    /// Terminal graphics protocols for ready images (keyed by URL)
    pub image_protocols: HashMap<String, StatefulProtocol>,
    /// Image picker for terminal rendering; `None` disables inline images
    pub picker: Option<Picker>,
    /// Whether inline images are enabled
    pub images_enabled: bool,
    /// Optional maximum content width in columns
    pub wrap_width: Option<u16>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether the editor is active (edit mode vs view mode)
    pub editor_mode: bool,
    /// The editor text buffer (populated when entering edit mode)
    pub editor: Option<EditorBuffer>,
    /// Scroll offset for the editor viewport (first visible line)
    pub editor_scroll: usize,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("title", &self.title)
            .field("elements", &self.document.element_count())
            .field("editor_mode", &self.editor_mode)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            Document::empty(),
            "untitled".to_string(),
            (80, 24),
            ImageCache::default(),
        )
    }
}

impl Model {
    /// Create a new model for a parsed document.
    pub fn new(
        document: Document,
        title: String,
        terminal_size: (u16, u16),
        cache: ImageCache,
    ) -> Self {
        let layout = layout::layout(
            document.elements(),
            content_width(terminal_size.0, None),
        );
        let viewport = Viewport::new(
            terminal_size.0,
            terminal_size.1.saturating_sub(1),
            layout.row_count(),
        );
        let images = document
            .image_urls()
            .into_iter()
            .map(|url| (url.to_string(), ImageState::Pending))
            .collect();

        Self {
            document,
            title,
            viewport,
            layout,
            cache,
            images,
            image_protocols: HashMap::new(),
            picker: None,
            images_enabled: true,
            wrap_width: None,
            toast: None,
            should_quit: false,
            editor_mode: false,
            editor: None,
            editor_scroll: 0,
        }
    }

    /// Attach an image picker for terminal rendering.
    #[must_use]
    pub fn with_picker(mut self, picker: Option<Picker>) -> Self {
        self.picker = picker;
        self
    }

    /// Replace the viewed document, preserving image state for URLs that the
    /// new document still references.
    pub fn set_document(&mut self, document: Document) {
        let mut images = HashMap::new();
        for url in document.image_urls() {
            let state = self
                .images
                .remove(url)
                .unwrap_or(ImageState::Pending);
            images.insert(url.to_string(), state);
        }
        self.image_protocols
            .retain(|url, _| images.contains_key(url));
        self.images = images;
        self.document = document;
        self.relayout();
    }

    /// Re-run layout for the current viewport width.
    pub fn relayout(&mut self) {
        self.layout = layout::layout(
            self.document.elements(),
            content_width(self.viewport.width(), self.wrap_width),
        );
        self.viewport.set_total_rows(self.layout.row_count());
    }

    /// Apply a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height.saturating_sub(1));
        self.relayout();
    }

    // --- Toasts ---

    /// Show a transient status message.
    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    /// The currently displayed toast, if any.
    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Drop an expired toast. Returns `true` if the display changed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| now >= toast.expires_at)
        {
            self.toast = None;
            return true;
        }
        false
    }

    // --- Image loading state ---

    /// URLs whose image slots are near the viewport and not yet requested.
    pub fn pending_images_near_viewport(&self) -> Vec<String> {
        let visible = self.viewport.visible_range();
        let from = visible.start.saturating_sub(IMAGE_OVERSCAN_ROWS);
        let to = visible.end + IMAGE_OVERSCAN_ROWS;

        let mut urls: Vec<String> = Vec::new();
        for slot in &self.layout.images {
            if slot.rows.end <= from || slot.rows.start >= to {
                continue;
            }
            if matches!(self.images.get(&slot.url), Some(ImageState::Pending))
                && !urls.contains(&slot.url)
            {
                urls.push(slot.url.clone());
            }
        }
        urls
    }

    /// Mark a URL as having a fetch in flight.
    pub fn mark_image_loading(&mut self, url: &str) {
        self.images.insert(url.to_string(), ImageState::Loading);
    }

    /// Store a decoded image and build its terminal protocol.
    pub fn set_image_ready(&mut self, url: &str, image: DynamicImage) {
        if let Some(picker) = &self.picker {
            self.image_protocols
                .insert(url.to_string(), picker.new_resize_protocol(image.clone()));
        }
        self.images.insert(url.to_string(), ImageState::Ready(image));
    }

    /// Record a failed fetch or decode.
    pub fn set_image_failed(&mut self, url: &str, message: String) {
        self.images
            .insert(url.to_string(), ImageState::Failed(message));
    }

    // --- Editor ---

    /// Load the document source into an editor buffer and switch modes.
    pub fn enter_edit_mode(&mut self) {
        self.editor = Some(EditorBuffer::from_text(self.document.source()));
        self.editor_mode = true;
        self.editor_scroll = 0;
    }

    /// Discard the editor buffer and return to view mode.
    pub fn exit_edit_mode(&mut self) {
        self.editor_mode = false;
        self.editor = None;
    }

    /// Re-parse the editor text as the viewed document (save-and-preview).
    ///
    /// Returns `false` when no editor is active.
    pub fn save_editor(&mut self) -> bool {
        let Some(editor) = &mut self.editor else {
            return false;
        };
        let text = editor.text();
        editor.mark_clean();
        self.set_document(Document::parse(&text));
        true
    }
}

/// Usable content width for layout, honoring the optional wrap width.
fn content_width(total: u16, wrap_width: Option<u16>) -> u16 {
    let width = total.saturating_sub(DOCUMENT_LEFT_PADDING).max(1);
    wrap_width.map_or(width, |max| width.min(max.max(1)))
}
