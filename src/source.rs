//! Document text sources: local files and remote URLs.
//!
//! Remote URLs go through GitHub-link normalization before any network call:
//! regular `github.com` links are rewritten to their `raw.githubusercontent.com`
//! form so the fetch returns markdown instead of an HTML page. Fetches use a
//! blocking HTTP client with fixed connect and read timeouts.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Connect timeout for HTTP requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Read timeout for HTTP requests.
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors produced while loading document text or image bytes.
///
/// Input errors (blank/invalid URL, empty content, unreadable file), network
/// errors (unreachable, timeout, HTTP status), and decode errors are all
/// recovered at the UI boundary; none of them are fatal to the process.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("please enter a URL")]
    EmptyUrl,
    #[error("invalid URL format")]
    InvalidUrl,
    #[error("file is empty")]
    EmptyContent,
    #[error("could not reach the server")]
    Unreachable,
    #[error("connection timed out")]
    Timeout,
    #[error("file not found{}", alternative_hint(.alternative))]
    NotFound {
        /// Suggested URL with the scheme toggled, offered for GitHub-derived
        /// URLs as a hint, never retried automatically.
        alternative: Option<String>,
    },
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode image")]
    ImageDecode,
}

fn alternative_hint(alternative: &Option<String>) -> String {
    alternative
        .as_deref()
        .map_or_else(String::new, |alt| format!(", try: {alt}"))
}

/// True if the input looks like a remote URL rather than a file path.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Normalize a user-supplied URL before fetching.
///
/// Strips a trailing slash, rejects blank input and URLs with no parseable
/// host, and rewrites GitHub links to their raw form:
/// `github.com/u/r/blob/main/f.md` becomes
/// `raw.githubusercontent.com/u/r/main/f.md`, and the legacy
/// `raw.github.com` host becomes `raw.githubusercontent.com`.
pub fn normalize_url(input: &str) -> Result<String, SourceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SourceError::EmptyUrl);
    }

    let url = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let parsed = Url::parse(url).map_err(|_| SourceError::InvalidUrl)?;
    if parsed.host_str().is_none() {
        return Err(SourceError::InvalidUrl);
    }

    Ok(to_raw_github_url(url))
}

fn to_raw_github_url(url: &str) -> String {
    if url.contains("github.com") && !url.contains("raw.githubusercontent.com") {
        url.replace("github.com", "raw.githubusercontent.com")
            .replace("/blob/", "/")
    } else if let Some(rest) = url.strip_prefix("https://raw.github.com/") {
        format!("https://raw.githubusercontent.com/{rest}")
    } else {
        url.to_string()
    }
}

/// Suggested alternative for a GitHub URL that returned 404: the same URL
/// with the scheme toggled from `http` to `https` (an `https` URL suggests
/// itself unchanged, matching the observed behavior this reproduces).
pub fn alternative_url(url: &str) -> String {
    url.replace("https://", "http://").replace("http://", "https://")
}

/// Read a local markdown file. Blank content is an error.
pub fn read_file(path: &Path) -> Result<String, SourceError> {
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(SourceError::EmptyContent);
    }
    Ok(content)
}

/// Fetch markdown text over HTTP. Blank bodies are an error; 404 against a
/// GitHub-derived URL carries a suggested alternative URL.
pub fn fetch_text(url: &str) -> Result<String, SourceError> {
    let response = http_get(url)?;
    let text = response.text().map_err(|err| classify(url, &err))?;
    if text.trim().is_empty() {
        return Err(SourceError::EmptyContent);
    }
    Ok(text)
}

/// Fetch raw bytes over HTTP (used for images).
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, SourceError> {
    let response = http_get(url)?;
    let bytes = response.bytes().map_err(|err| classify(url, &err))?;
    Ok(bytes.to_vec())
}

fn http_get(url: &str) -> Result<reqwest::blocking::Response, SourceError> {
    let client = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(READ_TIMEOUT)
        .build()
        .map_err(|err| SourceError::Request(err.to_string()))?;

    let response = client.get(url).send().map_err(|err| classify(url, &err))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(not_found(url));
    }
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    Ok(response)
}

fn classify(url: &str, err: &reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout
    } else if err.is_connect() {
        SourceError::Unreachable
    } else if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
        not_found(url)
    } else {
        SourceError::Request(err.to_string())
    }
}

fn not_found(url: &str) -> SourceError {
    let alternative = url
        .contains("github.com")
        .then(|| alternative_url(url));
    SourceError::NotFound { alternative }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Normalization ---

    #[test]
    fn test_normalize_github_blob_url() {
        let url = normalize_url("https://github.com/u/r/blob/main/f.md").unwrap();
        assert_eq!(url, "https://raw.githubusercontent.com/u/r/main/f.md");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        let url = normalize_url("https://example.com/doc.md/").unwrap();
        assert_eq!(url, "https://example.com/doc.md");
    }

    #[test]
    fn test_normalize_legacy_raw_github_host() {
        let url = normalize_url("https://raw.github.com/u/r/main/f.md").unwrap();
        assert_eq!(url, "https://raw.githubusercontent.com/u/r/main/f.md");
    }

    #[test]
    fn test_normalize_leaves_raw_githubusercontent_alone() {
        let input = "https://raw.githubusercontent.com/u/r/main/f.md";
        assert_eq!(normalize_url(input).unwrap(), input);
    }

    #[test]
    fn test_normalize_leaves_other_hosts_alone() {
        let input = "https://example.com/notes/readme.md";
        assert_eq!(normalize_url(input).unwrap(), input);
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(matches!(normalize_url("   "), Err(SourceError::EmptyUrl)));
    }

    #[test]
    fn test_normalize_rejects_hostless() {
        assert!(matches!(
            normalize_url("not a url"),
            Err(SourceError::InvalidUrl)
        ));
        assert!(matches!(
            normalize_url("file:///tmp/x.md"),
            Err(SourceError::InvalidUrl)
        ));
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let url = normalize_url("  https://example.com/a.md  ").unwrap();
        assert_eq!(url, "https://example.com/a.md");
    }

    // --- Alternative suggestion ---

    #[test]
    fn test_alternative_url_toggles_http_to_https() {
        assert_eq!(
            alternative_url("http://github.com/u/r"),
            "https://github.com/u/r"
        );
    }

    #[test]
    fn test_alternative_url_round_trips_https() {
        // The chained replacement sends https back to itself; kept as the
        // observed behavior.
        assert_eq!(
            alternative_url("https://github.com/u/r"),
            "https://github.com/u/r"
        );
    }

    #[test]
    fn test_not_found_carries_alternative_for_github_only() {
        match not_found("http://github.com/u/r/f.md") {
            SourceError::NotFound { alternative } => {
                assert_eq!(alternative.as_deref(), Some("https://github.com/u/r/f.md"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        match not_found("https://example.com/f.md") {
            SourceError::NotFound { alternative } => assert!(alternative.is_none()),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_message_includes_hint() {
        let err = not_found("http://github.com/u/r/f.md");
        let message = err.to_string();
        assert!(message.contains("try: https://github.com/u/r/f.md"));
    }

    // --- Input classification ---

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/a.md"));
        assert!(is_url("http://example.com/a.md"));
        assert!(!is_url("README.md"));
        assert!(!is_url("/tmp/notes.md"));
    }

    // --- Files ---

    #[test]
    fn test_read_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# hello\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "# hello\n");
    }

    #[test]
    fn test_read_file_blank_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.md");
        std::fs::write(&path, "  \n\n").unwrap();
        assert!(matches!(
            read_file(&path),
            Err(SourceError::EmptyContent)
        ));
    }

    #[test]
    fn test_read_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.md");
        assert!(matches!(read_file(&path), Err(SourceError::Io(_))));
    }
}
