// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. image::ImageCache)
    clippy::module_name_repetitions
)]

//! # mdview
//!
//! A terminal markdown viewer with remote fetch, inline editing, and image
//! support.
//!
//! mdview loads markdown from a local file or a URL (GitHub links are
//! rewritten to their raw form), parses it into a small set of structural
//! elements, and renders them in a scrollable terminal viewport:
//! - Headings, styled text runs, aligned tables, inline images
//! - Asynchronous image loading backed by a byte-bounded LRU cache
//! - An inline editor with bold/italic/code wrapping and save-and-preview
//!
//! ## Architecture
//!
//! mdview uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events, actions, and worker completions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Markdown parsing into elements
//! - [`editor`]: Rope-backed editing buffer
//! - [`image`]: Image cache, fetching, and terminal protocols
//! - [`source`]: File/URL loading and GitHub URL normalization
//! - [`ui`]: Layout, styling, and rendering

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod image;
pub mod source;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Document, MarkdownElement};
    pub use crate::image::ImageCache;
    pub use crate::ui::viewport::Viewport;
}
