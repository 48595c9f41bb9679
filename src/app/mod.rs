//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Side effects (image fetches on worker threads) are spawned from the
//! event loop and report back as messages over a channel.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{ImageState, Model, ToastLevel};
pub use update::{Message, update};

use crate::image::ImageCache;

/// Main application struct that owns the terminal and runs the event loop.
///
/// The image cache is injected by the caller so it can outlive individual
/// viewing sessions (process-wide scope).
pub struct App {
    content: String,
    title: String,
    cache: ImageCache,
    images_enabled: bool,
    wrap_width: Option<u16>,
}

impl App {
    /// Create a new application for already-loaded markdown text.
    pub fn new(content: String, title: String, cache: ImageCache) -> Self {
        Self {
            content,
            title,
            cache,
            images_enabled: true,
            wrap_width: None,
        }
    }

    /// Enable or disable inline image rendering.
    #[must_use]
    pub fn with_images_enabled(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }

    /// Limit the content width to at most `width` columns.
    #[must_use]
    pub const fn with_wrap_width(mut self, width: Option<u16>) -> Self {
        self.wrap_width = width;
        self
    }
}

#[cfg(test)]
mod tests;
