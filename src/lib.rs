//! Candidate Browser: a Zellij plugin for paging through job candidates.
//!
//! The plugin lists candidate applications served by a remote HTTP API and
//! lets the user search, filter, sort and page through them:
//! - Free-text search that refetches on every keystroke
//! - Multi-select filters by application type and source
//! - Four sort orders over last activity and name
//! - A truncated page-number bar (`1 … 4 5 6 … 20`)
//! - Stale responses from superseded requests are dropped, so only the most
//!   recent request ever reaches the screen

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
//! │  Application Layer (app/)                           │
//! │  - Event handling and input modes                   │
//! │  - QueryController (last request wins)              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────┐                   ┌───────────────┐
//! │ UI Layer      │                   │ API Layer     │
//! │ (ui/)         │                   │ (api/)        │
//! │ - Rendering   │                   │ - URL + query │
//! │ - Theming     │                   │ - Tickets     │
//! │ - Components  │                   │ - Responses   │
//! └───────────────┘                   └───────────────┘
//!         │                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - QueryState and its transitions                   │
//! │  - Page window calculation                          │
//! │  - Candidate model, errors, sandbox paths           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/candidate-browser.wasm" {
//!         api_url "https://hiring.example.com/api/candidates"
//!         per_page "10"
//!         job_id "42"
//!         fetch_timeout "15"
//!         theme "catppuccin-mocha"
//!         trace_level "candidate_browser=debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use candidate_browser::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::Start);
//! let Action::IssueRequest { url, .. } = &actions[0] else { unreachable!() };
//! assert!(url.ends_with("?page=1&per_page=5&sort_by=last_activity&sort_order=desc"));
//!
//! // Typing into the search bar issues a new request per keystroke.
//! handle_event(&mut state, &Event::SearchMode);
//! let (_, actions) = handle_event(&mut state, &Event::Char('a'));
//! assert!(matches!(actions[0], Action::IssueRequest { .. }));
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, FetchStatus, InputMode, QueryController};
pub use domain::{BrowserError, QueryState, Result};
pub use ui::Theme;

use api::{ApiConfig, DEFAULT_API_URL};
use app::controller::DEFAULT_FETCH_TIMEOUT_SECS;
use domain::query::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use std::collections::BTreeMap;

/// Plugin configuration parsed from the Zellij plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Candidate list endpoint.
    pub api_url: String,

    /// Page size, kept within `1..=50`.
    pub per_page: u32,

    /// Scopes every request to one job posting.
    pub job_id: Option<String>,

    /// Seconds before an in-flight request counts as failed. `0` disables.
    pub fetch_timeout: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive, e.g. `debug` or `candidate_browser=trace`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            job_id: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the plugin configuration map, falling back to the default for
    /// every missing, blank or invalid value.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use candidate_browser::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("per_page".to_string(), "10".to_string());
    /// map.insert("fetch_timeout".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.per_page, 10);
    /// assert_eq!(config.fetch_timeout, 10);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let number = |key: &str, default: u64| {
            parse_number(config, key).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "ignoring invalid configuration value");
                None
            })
            .unwrap_or(default)
        };

        let per_page = number("per_page", u64::from(defaults.per_page));
        let per_page = u32::try_from(per_page).unwrap_or(MAX_PER_PAGE).clamp(1, MAX_PER_PAGE);

        Self {
            api_url: text("api_url").unwrap_or(defaults.api_url),
            per_page,
            job_id: text("job_id"),
            fetch_timeout: number("fetch_timeout", defaults.fetch_timeout),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Endpoint settings for the controller.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            per_page: self.per_page,
            job_id: self.job_id.clone(),
        }
    }
}

/// Reads an optional non-negative integer.
fn parse_number(config: &BTreeMap<String, String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<u64>()
        .map(Some)
        .map_err(|e| BrowserError::Config(format!("{key} = {raw:?}: {e}")))
}

/// Builds the application state for a configuration.
///
/// The theme comes from `theme_file` if set, else from `theme_name`, else the
/// default. A theme that fails to load is logged and replaced by the default.
/// No request is issued until [`Event::Start`] is handled.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, per_page = config.per_page, "initializing candidate browser");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let controller = QueryController::new(config.api_config(), config.fetch_timeout);
    AppState::new(controller, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "https://hiring.example.com/api/candidates"),
            ("per_page", "20"),
            ("job_id", "42"),
            ("fetch_timeout", "0"),
            ("theme", "catppuccin-mocha"),
            ("theme_file", "/host/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_url, "https://hiring.example.com/api/candidates");
        assert_eq!(config.per_page, 20);
        assert_eq!(config.job_id.as_deref(), Some("42"));
        assert_eq!(config.fetch_timeout, 0);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-mocha"));
        assert_eq!(config.theme_file.as_deref(), Some("/host/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn per_page_is_clamped_and_garbage_ignored() {
        assert_eq!(Config::from_zellij(&map(&[("per_page", "500")])).per_page, 50);
        assert_eq!(Config::from_zellij(&map(&[("per_page", "0")])).per_page, 1);
        assert_eq!(Config::from_zellij(&map(&[("per_page", "-3")])).per_page, DEFAULT_PER_PAGE);
        assert_eq!(Config::from_zellij(&map(&[("job_id", "  ")])).job_id, None);
    }

    #[test]
    fn invalid_numbers_are_config_errors() {
        let err = parse_number(&map(&[("fetch_timeout", "ten")]), "fetch_timeout").unwrap_err();
        assert!(matches!(err, BrowserError::Config(_)));
        assert_eq!(parse_number(&map(&[]), "fetch_timeout").unwrap(), None);
    }

    #[test]
    fn initialize_wires_api_settings_into_the_controller() {
        let config = Config::from_zellij(&map(&[("per_page", "10"), ("job_id", "7"), ("fetch_timeout", "0")]));
        let mut state = initialize(&config);

        assert_eq!(state.controller.fetch_timeout(), None);
        let request = state.controller.start().unwrap();
        assert!(request.url.contains("per_page=10"));
        assert!(request.url.contains("job_id=7"));
    }

    #[test]
    fn theme_precedence() {
        let named = Config {
            theme_name: Some("catppuccin-mocha".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&named).theme.name, "catppuccin-mocha");

        let unknown = Config {
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&unknown).theme, Theme::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mocha = Theme::from_name("catppuccin-mocha").unwrap();
        file.write_all(toml::to_string(&mocha).unwrap().as_bytes()).unwrap();
        let from_file = Config {
            theme_name: Some("evergreen".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(initialize(&from_file).theme, mocha);
    }
}
