//! Configuration file parser for blogmirror.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`,
//! which archives the default blog into ./posts. Unknown keys are silently
//! ignored by serde, though we log a warning when the file contains
//! potential typos.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Archive run configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`. The whole value is built
/// once at startup and passed by reference into each pipeline stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the blog's feed tree, without a trailing slash
    /// (e.g. `https://example.blogspot.com/feeds`). The posts feed lives at
    /// `<feed_base>/posts/default`, the per-post comment feeds at
    /// `<feed_base>/<post_id>/comments/default`.
    pub feed_base: String,

    /// Directory the archive tree is written under. Created if missing.
    pub output_dir: PathBuf,

    /// Page size requested from the feed via `max-results`.
    pub page_size: u32,

    /// Fixed delay inserted before each follow-up request, in milliseconds.
    /// A politeness throttle, not a backoff; it is never adapted.
    pub request_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_base: "https://theguitarman.blogspot.com/feeds".to_string(),
            output_dir: PathBuf::from("posts"),
            page_size: 25,
            request_delay_ms: 500,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// URL of the first posts-feed page, with the page size applied.
    pub fn posts_feed_url(&self) -> String {
        format!(
            "{}/posts/default?max-results={}",
            self.feed_base.trim_end_matches('/'),
            self.page_size
        )
    }

    /// URL of the comment feed for a single post.
    pub fn comments_feed_url(&self, post_id: &str) -> String {
        format!(
            "{}/{}/comments/default",
            self.feed_base.trim_end_matches('/'),
            post_id
        )
    }

    /// The fixed inter-request delay as a [`Duration`].
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading to avoid slurping a corrupted or
        // maliciously large config file into memory.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {} // Size is within limits, proceed
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["feed_base", "output_dir", "page_size", "request_delay_ms"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), feed = %config.feed_base, "Loaded configuration");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
