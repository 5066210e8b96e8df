//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Userdeck
//! library and the Zellij plugin system. It implements the `ZellijPlugin`
//! trait, translating host events into library events and library actions
//! into host API calls.
//!
//! # Plugin lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the initial fetch is issued once
//!    granted
//! 3. **Update**: Map Zellij events to library events, delegate to
//!    `handle_event`, execute the returned actions
//! 4. **Render**: Record pane dimensions, call the library render function
//!
//! # Event mapping
//!
//! - `Key(...)` → navigation/search/overlay events depending on mode
//! - `Mouse(LeftClick)` → `Event::Click` (row activation / overlay dismiss)
//! - `Timer` → `Event::DebounceElapsed` (one per scheduled debounce timer)
//! - `WebRequestResult` → `Event::UsersFetched` tagged with the request id
//!   recovered from the request context
//!
//! # Keybindings
//!
//! Global (listing visible):
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Navigate
//! - `Enter`/`Space`: Open the detail overlay for the selected user
//! - `/`: Enter search mode
//! - `s`: Toggle sort direction
//! - `r`: Refetch the directory (also the retry binding on errors)
//! - `q`: Close the plugin
//!
//! In search mode:
//! - typing edits the query; `Enter`: focus results; `Esc`: exit search
//!
//! While the overlay is open:
//! - `Tab`/`Shift+Tab`: Cycle overlay focus; `Enter`: activate; `Esc`: close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;

use zellij_tile::prelude::*;

use userdeck::api::REQUEST_ID_CONTEXT_KEY;
use userdeck::{handle_event, initialize, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the host-facing configuration the
/// shim needs when executing actions.
struct State {
    /// Core application state from the library layer.
    app: userdeck::AppState,

    /// Users-collection endpoint, passed to `web_request`.
    endpoint: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: initialize(&config),
            endpoint: config.endpoint,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load: parses configuration, initializes
    /// tracing, requests the `WebAccess` permission and subscribes to
    /// events. The first fetch waits for the permission grant.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        userdeck::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoint = %config.endpoint, debounce_ms = config.debounce_ms, "plugin loading");
        self.app = initialize(&config);
        self.endpoint = config.endpoint;

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to
    /// `handle_event`, and executes resulting actions. Returns `true` if the
    /// UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(ref mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                return self.handle_permission_result(status);
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// Records the pane dimensions first so mouse hit-testing sees the same
    /// layout the renderer produces.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.record_dimensions(rows, cols);
        userdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events, depending on the overlay
    /// and input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.overlay.is_open() {
            if key.bare_key == BareKey::Tab && key.has_modifiers(&[KeyModifier::Shift]) {
                return Some(Event::FocusPrev);
            }
            return Some(match key.bare_key {
                BareKey::Tab => Event::FocusNext,
                BareKey::Enter => Event::ActivateFocus,
                BareKey::Esc | BareKey::Char('q') => Event::CloseDetails,
                _ => return None,
            });
        }

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        let typing = self.app.input_mode == InputMode::Search(SearchFocus::Typing);

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Enter if typing => Event::FocusResults,
            BareKey::Enter => Event::OpenDetails,
            BareKey::Char('/') => match self.app.input_mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Char(c) if typing => Event::Char(c),
            BareKey::Char(' ') => Event::OpenDetails,
            BareKey::Char('j') => Event::KeyDown,
            BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('s') => Event::ToggleSort,
            BareKey::Char('r') => Event::Refresh,
            _ => return None,
        })
    }

    /// Maps mouse events to application events.
    fn map_mouse_event(mouse: &Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => Some(Event::Click {
                line: *line,
                col: *col,
            }),
            Mouse::ScrollUp(_) => Some(Event::ScrollUp),
            Mouse::ScrollDown(_) => Some(Event::ScrollDown),
            _ => None,
        }
    }

    /// Maps a host web response to an application event.
    ///
    /// Responses without a parseable request id in their context are not
    /// ours and are ignored.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let request_id = context.get(REQUEST_ID_CONTEXT_KEY)?.parse::<u64>().ok()?;
        tracing::debug!(request_id, status, body_len = body.len(), "web request result");
        Some(Event::UsersFetched {
            request_id,
            status,
            body,
        })
    }

    /// Handles permission request results; the initial fetch is issued on
    /// grant.
    fn handle_permission_result(&mut self, status: PermissionStatus) -> bool {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - issuing initial fetch");
                match handle_event(&mut self.app, &Event::Refresh) {
                    Ok((should_render, actions)) => {
                        for action in actions {
                            self.execute_action(&action);
                        }
                        should_render
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "error issuing initial fetch");
                        false
                    }
                }
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - directory cannot be fetched");
                false
            }
        }
    }

    /// Executes an action returned from event handling.
    #[allow(clippy::cast_precision_loss)]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchUsers { request_id } => {
                tracing::debug!(request_id, endpoint = %self.endpoint, "starting web request");

                let mut headers = BTreeMap::new();
                headers.insert("Accept".to_string(), "application/json".to_string());

                let mut context = BTreeMap::new();
                context.insert(REQUEST_ID_CONTEXT_KEY.to_string(), request_id.to_string());

                web_request(&self.endpoint, HttpVerb::Get, headers, Vec::new(), context);
            }
            Action::StartDebounceTimer { delay_ms } => {
                tracing::trace!(delay_ms, "scheduling debounce timer");
                set_timeout(*delay_ms as f64 / 1000.0);
            }
        }
    }
}
