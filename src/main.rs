//! mdview - A terminal markdown viewer with remote fetch and image support.
//!
//! # Usage
//!
//! ```bash
//! mdview README.md
//! mdview https://github.com/user/repo/blob/main/README.md
//! mdview --no-images notes.md
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use mdview::app::App;
use mdview::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use mdview::image::{DEFAULT_CAPACITY_BYTES, ImageCache};
use mdview::source;

/// A terminal markdown viewer with remote fetch and image support
#[derive(Parser, Debug)]
#[command(name = "mdview", version, about, long_about = None)]
struct Cli {
    /// Markdown file path or URL to view
    #[arg(value_name = "FILE_OR_URL")]
    input: String,

    /// Disable inline image rendering (show placeholders only)
    #[arg(long)]
    no_images: bool,

    /// Maximum content width in columns
    #[arg(long, value_name = "COLS")]
    width: Option<u16>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Load the document text, resolving the input as a URL or a file path.
///
/// Returns the content together with a display title. All source errors are
/// surfaced here, before the terminal is taken over.
fn load_content(input: &str) -> Result<(String, String)> {
    if source::is_url(input) {
        let url = source::normalize_url(input)?;
        tracing::info!(%url, "fetching document");
        let content =
            source::fetch_text(&url).with_context(|| format!("Failed to load {url}"))?;
        Ok((content, url))
    } else {
        let path = Path::new(input);
        let content = source::read_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let title = path
            .file_name()
            .map_or_else(|| input.to_string(), |name| name.to_string_lossy().to_string());
        Ok((content, title))
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let (content, title) = load_content(&cli.input)?;

    // The image cache is process-wide: constructed once here and handed to
    // the app, which clones it into worker threads.
    let cache = ImageCache::new(DEFAULT_CAPACITY_BYTES);

    let mut app = App::new(content, title, cache)
        .with_images_enabled(!effective.no_images)
        .with_wrap_width(effective.width);

    app.run().context("Application error")
}
