//! Userdeck: a Zellij plugin for browsing a remote user directory.
//!
//! Userdeck renders the user collection of a read-only REST endpoint as an
//! interactive terminal dashboard:
//! - Debounced search-as-you-type filtering on user names
//! - Locale-aware sorting with a single-key direction toggle
//! - A detail overlay for one user with a keyboard focus trap
//! - Classified fetch failures with a retry affordance
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, action dispatching               │
//! │  - Derived-list recomputation                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!      │               │                │            │
//! ┌──────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────┐
//! │ UI Layer │  │ Query Layer │  │ API Layer │  │ Debounce │
//! │ (ui/)    │  │ (query/)    │  │ (api/)    │  │          │
//! │ Rendering│  │ Filter/Sort │  │ Fetch     │  │ Timers   │
//! │ Theming  │  │ (pure fns)  │  │ taxonomy  │  │ (pure)   │
//! └──────────┘  └─────────────┘  └───────────┘  └──────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - User model (domain/), errors                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Tracing to file (observability/)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Data flow
//!
//! One HTTP GET (performed by the Zellij host) produces the full user
//! collection. The visible listing is always derived from it as
//! `sort(filter(users, debounced_term), direction)`: filter before sort,
//! recomputed from scratch whenever one of the three inputs changes. User
//! input flows back in as events; side effects (fetching, debounce timers,
//! closing the pane) come back out as actions executed by the shim.
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/userdeck.wasm" {
//!         endpoint "https://jsonplaceholder.typicode.com/users"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod debounce;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Overlay, Phase, SearchFocus};
pub use domain::{Result, User, UserdeckError};
pub use query::SortDirection;
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default debounce delay applied to the search input.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
#[derive(Debug, Clone)]
pub struct Config {
    /// Users-collection endpoint.
    ///
    /// Injected rather than compiled in, so deployments and tests can point
    /// the plugin at a different directory service. Default:
    /// [`api::DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Debounce delay for the search input, in milliseconds. Default: 300.
    pub debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing level for exported spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: api::DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. Typed values fall back to their defaults on
    /// missing or malformed entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use userdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "https://example.test/users".to_string());
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "https://example.test/users");
    /// assert_eq!(config.debounce_ms, 150);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let endpoint = config
            .get("endpoint")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| api::DEFAULT_ENDPOINT.to_string());

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        Self {
            endpoint,
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin application state from configuration.
///
/// Resolves the theme (custom file first, then built-in name, then the
/// default) and creates an [`AppState`] in the loading phase; the first
/// fetch is issued once the host grants permissions.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing userdeck plugin");

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
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, config.debounce_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_apply_to_an_empty_map() {
        let config = Config::from_zellij(&BTreeMap::new());

        assert_eq!(config.endpoint, api::DEFAULT_ENDPOINT);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(config.theme_name.is_none());
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn malformed_debounce_falls_back_to_default() {
        let mut map = BTreeMap::new();
        map.insert("debounce_ms".to_string(), "soon".to_string());

        assert_eq!(Config::from_zellij(&map).debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn blank_endpoint_falls_back_to_default() {
        let mut map = BTreeMap::new();
        map.insert("endpoint".to_string(), "   ".to_string());

        assert_eq!(Config::from_zellij(&map).endpoint, api::DEFAULT_ENDPOINT);
    }

    #[test]
    fn initialize_starts_in_the_loading_phase() {
        let state = initialize(&Config::default());

        assert_eq!(state.phase, Phase::Loading);
        assert!(state.users.is_empty());
        assert_eq!(state.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }
}
