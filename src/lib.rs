//! MovieGallery: a Zellij plugin for browsing TMDB and saving movie artwork.
//!
//! The plugin shows popular movies on start, searches by title, opens a
//! detail view per movie and downloads the original-size poster or backdrop
//! into a configured directory.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← web_request, run_command
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event reducer
//! │  - Screens and request tickets                      │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ TMDB Client   │   │ Downloads     │
//! │ (ui/)         │   │ (tmdb/)       │   │ (download/)   │
//! │ - Rendering   │   │ - Request URLs│   │ - Save bytes  │
//! │ - Theming     │   │ - Page parsing│   │ - URL opener  │
//! │ - Components  │   │ - Image URLs  │   │   fallback    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Movie model (domain/movie)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans to a local OTLP JSON file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing below `main.rs` calls into Zellij. Network and process effects are
//! returned as [`Action`]s, and their results come back as [`Event`]s.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/movie-gallery.wasm" {
//!         api_key "your-tmdb-v3-key"
//!         download_dir "~/Pictures/movies"
//!         open_command "xdg-open"
//!         theme "catppuccin-mocha"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use movie_gallery::{handle_event, initialize, Action, Config, Event, PageKind, Screen};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::Activate)?;
//! let Some(Action::FetchPage { ticket, .. }) = actions.first() else {
//!     unreachable!("activation always fetches");
//! };
//!
//! let body = br#"{"page":1,"results":[],"total_pages":0,"total_results":0}"#.to_vec();
//! handle_event(
//!     &mut state,
//!     &Event::PageLoaded { ticket: *ticket, kind: PageKind::Popular, status: 200, body },
//! )?;
//! assert_eq!(state.screen, Screen::EmptyNoQuery);
//! # Ok::<(), movie_gallery::GalleryError>(())
//! ```

pub mod app;
pub mod domain;
pub mod download;
pub mod infrastructure;
pub mod tmdb;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, PageContext, Screen};
pub use domain::{GalleryError, Movie, Result, ResultPage};
pub use download::{DownloadHelper, DownloadOutcome, ImageRequest, UrlOpener};
pub use tmdb::{ImageSize, MetadataClient, PageFetch, PageKind, TmdbConfig};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default directory for saved images: the host directory Zellij exposes.
pub const DEFAULT_DOWNLOAD_DIR: &str = "/host";

/// Default command used to open an image URL when saving fails.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB v3 API key. Requests without one fail and show the error banner.
    pub api_key: String,

    /// TMDB REST base, without trailing slash.
    pub base_url: String,

    /// TMDB image CDN base, without trailing slash.
    pub image_base_url: String,

    /// Where downloads are saved. `~` and relative paths resolve under `/host`.
    pub download_dir: String,

    /// Program run with the image URL when a download cannot be saved.
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: tmdb::DEFAULT_BASE_URL.to_string(),
            image_base_url: tmdb::DEFAULT_IMAGE_BASE_URL.to_string(),
            download_dir: DEFAULT_DOWNLOAD_DIR.to_string(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or blank values fall back to the defaults; URL values lose
    /// trailing slashes.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use movie_gallery::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("api_key".to_string(), " abc123 ".to_string()),
    ///     ("base_url".to_string(), "http://localhost:8080/3/".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key, "abc123");
    /// assert_eq!(config.base_url, "http://localhost:8080/3");
    /// assert_eq!(config.open_command, "xdg-open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let url = |key: &str, default: String| {
            value(key).map_or(default, |v| v.trim_end_matches('/').to_string())
        };

        Self {
            api_key: value("api_key").unwrap_or(defaults.api_key),
            base_url: url("base_url", defaults.base_url),
            image_base_url: url("image_base_url", defaults.image_base_url),
            download_dir: value("download_dir").unwrap_or(defaults.download_dir),
            open_command: value("open_command").unwrap_or(defaults.open_command),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// Connection settings for the metadata client.
    #[must_use]
    pub fn tmdb_config(&self) -> TmdbConfig {
        TmdbConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            image_base_url: self.image_base_url.clone(),
        }
    }

    /// Sandbox path of the download directory.
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        infrastructure::resolve_host_path(&self.download_dir)
    }

    /// The theme named by `theme_file` or `theme`, falling back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// The state starts on the loading screen; the first [`Event::Activate`]
/// issues the popular-titles request.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing movie gallery");

    if config.api_key.is_empty() {
        tracing::warn!("no api_key configured, TMDB requests will be rejected");
    }

    AppState::new(MetadataClient::new(config.tmdb_config()), config.theme())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_are_ignored() {
        let map = BTreeMap::from([
            ("download_dir".to_string(), "   ".to_string()),
            ("theme".to_string(), String::new()),
        ]);
        let config = Config::from_zellij(&map);
        assert_eq!(config.download_dir, DEFAULT_DOWNLOAD_DIR);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn download_dir_resolves_under_host() {
        let map = BTreeMap::from([("download_dir".to_string(), "~/Pictures".to_string())]);
        assert_eq!(Config::from_zellij(&map).download_dir(), PathBuf::from("/host/Pictures"));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn theme_file_takes_precedence() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn initialize_uses_configured_endpoints() {
        let config = Config {
            api_key: "k".to_string(),
            image_base_url: "http://img.local".to_string(),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.client.config().image_base_url, "http://img.local");
        assert!(state.is_loading());
    }
}
