//! Lensdrop: a Zellij plugin front end for an image search backend.
//!
//! Lensdrop lets you query an image index from the terminal:
//! - Text search: type a description, get matching images
//! - Image search: drop (type or paste) a file path, get similar images
//! - Results shown as a responsive grid with deferred image checks
//! - A single status line for loading, errors and empty results

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Mode switch, upload handler                      │
//! │  - Search orchestrator (generations, timeouts)      │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌────────────────┐
//! │ UI Layer      │   │ Client Layer  │   │ Infrastructure │
//! │ (ui/)         │   │ (client/)     │   │ - Paths        │
//! │ - Rendering   │   │ - URLs        │   │ - File reading │
//! │ - Theming     │   │ - Multipart   │   │ - MIME types   │
//! │ - Components  │   │ - Decoding    │   │                │
//! └───────────────┘   └───────────────┘   └────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): search types, error taxonomy     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a JSON-lines file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/lensdrop.wasm" {
//!         backend_url "http://localhost:5000"
//!         request_timeout_secs "30"
//!         max_upload_bytes "16777216"
//!         cell_width "28"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Images can also be sent from a shell:
//!
//! ```sh
//! zellij pipe --name search_image -- ~/Pictures/cat.jpg
//! ```
//!
//! # Example
//!
//! ```rust
//! use lensdrop::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "red bicycle".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.first(), Some(Action::WebRequest(_))));
//! # Ok::<(), lensdrop::ImageSearchError>(())
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, SearchMode, SearchSettings, SearchState};
pub use domain::{ImageSearchError, Result, SearchError};
pub use ui::Theme;

use std::collections::BTreeMap;

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;
const DEFAULT_CELL_WIDTH: usize = 28;
const MIN_CELL_WIDTH: usize = 12;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search backend base URL, without a trailing `/`.
    pub backend_url: String,

    /// Seconds before a pending search fails. `None` disables the timer.
    pub request_timeout_secs: Option<u64>,

    /// Largest image accepted for upload, in bytes.
    pub max_upload_bytes: u64,

    /// Grid cell width in columns, at least 12.
    pub cell_width: usize,

    /// Built-in theme name to use. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `"debug"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cell_width: DEFAULT_CELL_WIDTH,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Every key is optional. Values that fail to parse fall back to their
    /// default and are logged.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use lensdrop::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("backend_url".to_string(), "http://search.lan:8080/".to_string());
    /// map.insert("request_timeout_secs".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.backend_url, "http://search.lan:8080");
    /// assert_eq!(config.request_timeout_secs, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let backend_url = config
            .get("backend_url")
            .map_or_else(|| Ok(DEFAULT_BACKEND_URL.to_string()), |raw| parse_backend_url(raw))
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid backend_url, using default");
                DEFAULT_BACKEND_URL.to_string()
            });

        let request_timeout_secs = match config.get("request_timeout_secs").map(|s| s.trim().parse::<u64>()) {
            None => Some(DEFAULT_TIMEOUT_SECS),
            Some(Ok(0)) => None,
            Some(Ok(secs)) => Some(secs),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "invalid request_timeout_secs, using default");
                Some(DEFAULT_TIMEOUT_SECS)
            }
        };

        let max_upload_bytes = config
            .get("max_upload_bytes")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|bytes| *bytes > 0)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let cell_width = config
            .get("cell_width")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_CELL_WIDTH)
            .max(MIN_CELL_WIDTH);

        Self {
            backend_url,
            request_timeout_secs,
            max_upload_bytes,
            cell_width,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The subset of configuration the search flow reads.
    #[must_use]
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            backend_url: self.backend_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            max_upload_bytes: self.max_upload_bytes,
            cell_width: self.cell_width,
        }
    }
}

/// Validates a backend base URL and strips trailing separators.
fn parse_backend_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();

    let host = ["http://", "https://"]
        .iter()
        .find_map(|scheme| lower.strip_prefix(scheme))
        .ok_or_else(|| {
            ImageSearchError::Config(format!(
                "backend_url must start with http:// or https://, got {raw:?}"
            ))
        })?;

    if host.is_empty() {
        return Err(ImageSearchError::Config(format!("backend_url has no host: {raw:?}")));
    }

    Ok(trimmed.to_string())
}

/// Initializes the plugin state with configuration.
///
/// Loads the theme (file, then name, then default) and builds an idle
/// [`SearchState`] in text mode.
pub fn initialize(config: &Config) -> SearchState {
    tracing::debug!(backend_url = %config.backend_url, "initializing lensdrop plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::paths::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    SearchState::new(config.settings(), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("backend_url", "localhost:5000"),
            ("request_timeout_secs", "soon"),
            ("max_upload_bytes", "-1"),
            ("cell_width", "3"),
        ]));
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.request_timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.cell_width, MIN_CELL_WIDTH);
    }

    #[test]
    fn scheme_check_is_a_config_error() {
        assert!(matches!(parse_backend_url("ftp://x"), Err(ImageSearchError::Config(_))));
        assert!(matches!(parse_backend_url("http://"), Err(ImageSearchError::Config(_))));
        assert_eq!(parse_backend_url(" https://a.b/api// ").unwrap(), "https://a.b/api");
    }

    #[test]
    fn initialize_uses_named_theme_and_settings() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            cell_width: 40,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.settings.cell_width, 40);
        assert_eq!(state.mode, SearchMode::Text);
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}
