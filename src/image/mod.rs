//! Image caching, fetching, and terminal rendering support.
//!
//! Decoded images live in a process-wide [`ImageCache`] shared between the
//! UI and worker threads. Terminal rendering goes through `ratatui-image`,
//! which picks the best available graphics protocol (Kitty, Sixel, iTerm2,
//! or half-block fallback).

mod cache;
mod fetch;

pub use cache::{DEFAULT_CAPACITY_BYTES, ImageCache};
pub use fetch::fetch_image;

#[cfg(unix)]
use std::time::Duration;

use ratatui_image::picker::Picker;
#[cfg(unix)]
use ratatui_image::picker::cap_parser::QueryStdioOptions;

#[cfg(unix)]
const PICKER_QUERY_TIMEOUT_MS: u64 = 250;

/// Create a picker for terminal image rendering.
///
/// The picker detects terminal capabilities and chooses the best protocol.
/// Returns `None` when detection fails; callers fall back to alt-text
/// placeholders.
pub fn create_picker() -> Option<Picker> {
    // On Windows, skip the stdio capability query — it can leave orphaned
    // reader threads on the console input buffer. Fall back to half-block
    // rendering.
    #[cfg(not(unix))]
    {
        tracing::debug!("windows fallback, using half-block image protocol");
        return Some(Picker::halfblocks());
    }

    #[cfg(unix)]
    {
        let picker = Picker::from_query_stdio_with_options(query_options()).ok()?;
        tracing::debug!(protocol = ?picker.protocol_type(), "detected image protocol");
        Some(picker)
    }
}

#[cfg(unix)]
fn query_options() -> QueryStdioOptions {
    let mut options = QueryStdioOptions::default();
    options.timeout = Duration::from_millis(PICKER_QUERY_TIMEOUT_MS);
    options
}

#[cfg(test)]
mod tests {
    #[cfg(unix)]
    use super::*;
    #[cfg(unix)]
    use std::time::Duration;

    #[cfg(unix)]
    #[test]
    fn test_picker_query_timeout_is_fast() {
        let options = query_options();
        assert_eq!(options.timeout, Duration::from_millis(250));
    }
}
