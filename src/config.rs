use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Persisted command-line defaults.
///
/// The config file is a list of flag tokens, one or more per line, exactly
/// as they would appear on the command line. A global file holds saved
/// defaults (`--save`) and a local `.mdviewrc` can override per directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_images: bool,
    pub width: Option<u16>,
}

impl ConfigFlags {
    /// Merge, with `other` (typically the CLI) winning for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_images: self.no_images || other.no_images,
            width: other.width.or(self.width),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mdview").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mdview")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mdview").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("mdview").join("config");
        }
    }

    PathBuf::from(".mdviewrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mdviewrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# mdview defaults (saved with --save)".to_string());
    if flags.no_images {
        lines.push("--no-images".to_string());
    }
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-images" {
            flags.no_images = true;
        } else if token == "--width" {
            if let Some(next) = tokens.get(i + 1) {
                flags.width = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--width=") {
            flags.width = value.parse().ok();
        }
        i += 1;
    }
    flags
}
