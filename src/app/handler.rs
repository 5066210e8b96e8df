//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! host timer expirations, and fetch responses, translating them into state
//! changes and side-effect actions. It is the primary control flow
//! coordinator for the plugin.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keyboard, mouse, timers, web
//!    responses)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution by the shim
//!
//! # Event categories
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `ScrollUp`, `ScrollDown`
//! - **Overlay**: `OpenDetails`, `CloseDetails`, `FocusNext`, `FocusPrev`,
//!   `ActivateFocus`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`,
//!   `ExitSearch`, `Char`, `Backspace`
//! - **Listing**: `ToggleSort`, `Refresh`
//! - **Host**: `DebounceElapsed`, `UsersFetched`, `Click`, `Escape`,
//!   `CloseFocus`

use crate::api;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::ui::components::overlay_rect;

use super::modes::{InputMode, Overlay, OverlayControl, Phase, SearchFocus};

/// Events triggered by user input or host callbacks.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes these sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down one row (wraps to top).
    KeyDown,
    /// Moves the selection up one row (wraps to bottom).
    KeyUp,
    /// Moves the selection up one row (mouse wheel).
    ScrollUp,
    /// Moves the selection down one row (mouse wheel).
    ScrollDown,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Opens the detail overlay for the currently selected user.
    OpenDetails,
    /// Closes the detail overlay, restoring selection to its trigger row.
    CloseDetails,
    /// Moves overlay focus to the next control (Tab).
    FocusNext,
    /// Moves overlay focus to the previous control (Shift+Tab).
    FocusPrev,
    /// Activates the focused overlay control (Enter).
    ActivateFocus,

    /// Enters search mode with typing focus, starting a fresh query.
    SearchMode,
    /// Returns focus to the search input field (from navigating).
    FocusSearchBar,
    /// Moves focus from the search input to the filtered results.
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Context-dependent dismissal: closes the overlay if open, otherwise
    /// exits search.
    Escape,

    /// Toggles the listing's sort direction.
    ToggleSort,
    /// (Re)fetches the user collection; also the retry affordance.
    Refresh,

    /// A host debounce timer expired.
    DebounceElapsed,

    /// The host delivered the response for a fetch.
    UsersFetched {
        /// Request id carried through the host request's context map.
        request_id: u64,
        /// HTTP status; zero when the request failed at transport level.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// A mouse click at pane coordinates (0-indexed line, column).
    Click {
        /// Clicked pane line.
        line: isize,
        /// Clicked pane column.
        col: usize,
    },
}

/// Processes an event, mutates application state, and returns whether the UI
/// should re-render along with the actions to execute.
///
/// # Errors
///
/// Returns errors from state mutation methods; event handling itself is
/// total over the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown | Event::ScrollDown => {
            if state.overlay.is_open() {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp | Event::ScrollUp => {
            if state.overlay.is_open() {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => {
            // Teardown: no debounce timer may fire into a closed pane.
            state.debounced_term.cancel();
            Ok((false, vec![Action::CloseFocus]))
        }
        Event::OpenDetails => open_details(state),
        Event::CloseDetails => close_details(state),
        Event::ActivateFocus => match state.overlay {
            Overlay::Details {
                focus: OverlayControl::Close,
                ..
            } => close_details(state),
            // A focused control without an activation effect (the website
            // line) is a no-op.
            _ => Ok((false, vec![])),
        },
        Event::FocusNext => {
            if let Overlay::Details { focus, .. } = &mut state.overlay {
                *focus = focus.next();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::FocusPrev => {
            if let Overlay::Details { focus, .. } = &mut state.overlay {
                *focus = focus.previous();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            state.debounced_term.force(String::new());
            state.recompute_listing();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                state.recompute_listing();
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => exit_search(state),
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, "search query updated");
            Ok((true, schedule_debounce(state)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.search_query.pop();
            Ok((true, schedule_debounce(state)))
        }
        Event::Escape => {
            if state.overlay.is_open() {
                return close_details(state);
            }
            if matches!(state.input_mode, InputMode::Search(_)) {
                return exit_search(state);
            }
            Ok((false, vec![]))
        }
        Event::ToggleSort => {
            if !state.phase.is_ready() {
                return Ok((false, vec![]));
            }

            // Keep the cursor on the same user across the flip.
            let followed = state.selected_user().map(|u| u.id);
            state.sort_direction = state.sort_direction.toggled();
            state.recompute_listing();
            if let Some(id) = followed {
                if let Some(index) = state.visible_users.iter().position(|u| u.id == id) {
                    state.selected_index = index;
                }
            }

            tracing::debug!(direction = ?state.sort_direction, "sort direction toggled");
            Ok((true, vec![]))
        }
        Event::Refresh => {
            let request_id = state.fetch_guard.issue();
            state.phase = Phase::Loading;
            state.overlay = Overlay::Closed;
            state.recompute_listing();

            tracing::debug!(request_id, "issuing user fetch");
            Ok((true, vec![Action::FetchUsers { request_id }]))
        }
        Event::DebounceElapsed => {
            let Some(generation) = state.debounce_timers.pop_front() else {
                return Ok((false, vec![]));
            };
            if state.debounced_term.fire(generation) {
                tracing::debug!(term = %state.debounced_term.settled(), "search term settled");
                state.recompute_listing();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::UsersFetched {
            request_id,
            status,
            body,
        } => users_fetched(state, *request_id, *status, body),
        Event::Click { line, col } => click(state, *line, *col),
    }
}

/// Schedules a debounce timer for the current query, if one is needed.
fn schedule_debounce(state: &mut AppState) -> Vec<Action> {
    match state.debounced_term.submit(state.search_query.clone()) {
        Some(generation) => {
            state.debounce_timers.push_back(generation);
            vec![Action::StartDebounceTimer {
                delay_ms: state.debounce_ms,
            }]
        }
        None => vec![],
    }
}

fn open_details(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(user) = state.selected_user() else {
        tracing::debug!("no user selected");
        return Ok((false, vec![]));
    };

    tracing::debug!(user_id = user.id, user_name = %user.name, "opening details overlay");
    state.overlay = Overlay::Details {
        user_id: user.id,
        trigger_index: state.selected_index,
        focus: OverlayControl::Close,
    };
    Ok((true, vec![]))
}

fn close_details(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Overlay::Details { trigger_index, .. } = state.overlay else {
        return Ok((false, vec![]));
    };

    state.overlay = Overlay::Closed;
    // Focus restoration: the selection returns to the row that opened the
    // overlay, clamped in case the listing shrank meanwhile.
    if !state.visible_users.is_empty() {
        state.selected_index = trigger_index.min(state.visible_users.len() - 1);
    }

    tracing::debug!(restored_index = state.selected_index, "details overlay closed");
    Ok((true, vec![]))
}

fn exit_search(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    tracing::debug!(query = %state.search_query, "exiting search mode");
    state.input_mode = InputMode::Normal;
    state.search_query = String::new();
    state.debounced_term.force(String::new());
    state.recompute_listing();
    Ok((true, vec![]))
}

fn users_fetched(
    state: &mut AppState,
    request_id: u64,
    status: u16,
    body: &[u8],
) -> Result<(bool, Vec<Action>)> {
    if !state.fetch_guard.accepts(request_id) {
        tracing::debug!(request_id, "dropping response from superseded fetch");
        return Ok((false, vec![]));
    }

    match api::parse_users(status, body) {
        Ok(users) => {
            tracing::debug!(user_count = users.len(), "user collection fetched");
            state.users = users;
            state.phase = Phase::Ready;
            state.fetched_at = Some(chrono::Utc::now().timestamp());
        }
        Err(error) => {
            tracing::warn!(%error, status, "user fetch failed");
            state.users.clear();
            state.phase = Phase::Failed(error);
        }
    }

    // The collection is replaced wholesale either way: close the overlay and
    // derive the listing afresh.
    state.overlay = Overlay::Closed;
    state.selected_index = 0;
    state.recompute_listing();
    Ok((true, vec![]))
}

fn click(state: &mut AppState, line: isize, col: usize) -> Result<(bool, Vec<Action>)> {
    if state.overlay.is_open() {
        let (top, left, height, width) = overlay_rect(state.last_rows, state.last_cols);
        let row = usize::try_from(line).map_or(0, |l| l + 1);
        let inside = row >= top && row < top + height && col >= left && col < left + width;
        if inside {
            return Ok((false, vec![]));
        }
        tracing::debug!("click outside overlay, closing");
        return close_details(state);
    }

    let Some(index) = state.row_to_index(line) else {
        return Ok((false, vec![]));
    };
    state.selected_index = index;
    open_details(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    const PAYLOAD: &str = r#"[
        {
            "id": 1,
            "name": "Bob",
            "username": "bob",
            "email": "bob@example.com",
            "address": {
                "street": "1 Main St", "suite": "Apt. 1", "city": "Springfield",
                "zipcode": "00000", "geo": { "lat": "0.0", "lng": "0.0" }
            },
            "phone": "555-0100",
            "website": "bob.example.com",
            "company": { "name": "Acme", "catchPhrase": "Beyond anvils", "bs": "drop things" }
        },
        {
            "id": 2,
            "name": "alice",
            "username": "alice",
            "email": "alice@example.com",
            "address": {
                "street": "2 Main St", "suite": "Apt. 2", "city": "Springfield",
                "zipcode": "00000", "geo": { "lat": "0.0", "lng": "0.0" }
            },
            "phone": "555-0101",
            "website": "alice.example.com",
            "company": { "name": "Initech", "catchPhrase": "TPS reports", "bs": "file things" }
        }
    ]"#;

    fn fresh_state() -> AppState {
        AppState::new(Theme::default(), 300)
    }

    /// Drives the state through a fetch cycle: Refresh, then the response.
    fn fetched_state(status: u16, body: &[u8]) -> AppState {
        let mut state = fresh_state();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let Action::FetchUsers { request_id } = actions[0] else {
            panic!("expected a fetch action");
        };
        handle_event(
            &mut state,
            &Event::UsersFetched {
                request_id,
                status,
                body: body.to_vec(),
            },
        )
        .unwrap();
        state
    }

    fn visible_names(state: &AppState) -> Vec<&str> {
        state.visible_users.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn successful_fetch_populates_a_sorted_listing() {
        let state = fetched_state(200, PAYLOAD.as_bytes());

        assert!(state.phase.is_ready());
        assert_eq!(visible_names(&state), &["alice", "Bob"]);
        assert!(state.fetched_at.is_some());
    }

    #[test]
    fn http_500_enters_the_failed_phase_and_retry_reissues_the_fetch() {
        let mut state = fetched_state(500, b"boom");

        assert_eq!(state.phase, Phase::Failed(api::FetchError::Status { status: 500 }));
        assert!(state.visible_users.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(matches!(actions[0], Action::FetchUsers { .. }));
        assert_eq!(state.phase, Phase::Loading);
    }

    #[test]
    fn stale_fetch_responses_are_dropped() {
        let mut state = fresh_state();

        let (_, first) = handle_event(&mut state, &Event::Refresh).unwrap();
        let Action::FetchUsers { request_id: stale } = first[0] else {
            panic!("expected a fetch action");
        };
        let (_, second) = handle_event(&mut state, &Event::Refresh).unwrap();
        let Action::FetchUsers { request_id: current } = second[0] else {
            panic!("expected a fetch action");
        };

        // The newer fetch resolves first.
        handle_event(
            &mut state,
            &Event::UsersFetched {
                request_id: current,
                status: 200,
                body: PAYLOAD.as_bytes().to_vec(),
            },
        )
        .unwrap();
        assert_eq!(state.users.len(), 2);

        // The slow stale response must not overwrite it.
        let (rendered, _) = handle_event(
            &mut state,
            &Event::UsersFetched {
                request_id: stale,
                status: 500,
                body: b"late failure".to_vec(),
            },
        )
        .unwrap();
        assert!(!rendered);
        assert!(state.phase.is_ready());
        assert_eq!(state.users.len(), 2);
    }

    #[test]
    fn typing_filters_only_after_the_debounce_settles() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());

        handle_event(&mut state, &Event::SearchMode).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Char('b')).unwrap();
        assert_eq!(actions, vec![Action::StartDebounceTimer { delay_ms: 300 }]);
        handle_event(&mut state, &Event::Char('o')).unwrap();

        // Still unfiltered: the term has not settled.
        assert_eq!(visible_names(&state), &["alice", "Bob"]);

        // First timer belongs to the superseded 'b' submission.
        handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert_eq!(visible_names(&state), &["alice", "Bob"]);

        // Second timer settles "bo".
        handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert_eq!(visible_names(&state), &["Bob"]);
    }

    #[test]
    fn exiting_search_clears_the_filter_immediately() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert_eq!(visible_names(&state), &["Bob"]);

        handle_event(&mut state, &Event::ExitSearch).unwrap();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(visible_names(&state), &["alice", "Bob"]);
    }

    #[test]
    fn details_overlay_opens_on_selection_and_escape_restores_focus() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());

        handle_event(&mut state, &Event::KeyDown).unwrap();
        assert_eq!(state.selected_user().map(|u| u.name.as_str()), Some("Bob"));

        handle_event(&mut state, &Event::OpenDetails).unwrap();
        assert_eq!(
            state.overlay,
            Overlay::Details {
                user_id: 1,
                trigger_index: 1,
                focus: OverlayControl::Close,
            }
        );

        // Navigation is inert while the overlay is open.
        let (rendered, _) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!rendered);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.overlay, Overlay::Closed);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn overlay_focus_cycles_and_enter_on_close_dismisses() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());
        handle_event(&mut state, &Event::OpenDetails).unwrap();

        handle_event(&mut state, &Event::FocusNext).unwrap();
        assert!(matches!(
            state.overlay,
            Overlay::Details {
                focus: OverlayControl::Website,
                ..
            }
        ));

        // Enter on the website line does nothing.
        let (rendered, _) = handle_event(&mut state, &Event::ActivateFocus).unwrap();
        assert!(!rendered);
        assert!(state.overlay.is_open());

        // Wrap back to Close and activate.
        handle_event(&mut state, &Event::FocusNext).unwrap();
        handle_event(&mut state, &Event::ActivateFocus).unwrap();
        assert_eq!(state.overlay, Overlay::Closed);
    }

    #[test]
    fn second_escape_leaves_search_after_closing_the_overlay() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        handle_event(&mut state, &Event::FocusResults).unwrap();
        handle_event(&mut state, &Event::OpenDetails).unwrap();

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!state.overlay.is_open());
        assert!(matches!(state.input_mode, InputMode::Search(_)));

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn toggling_sort_reverses_the_listing_and_follows_the_selection() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());
        assert_eq!(visible_names(&state), &["alice", "Bob"]);
        let followed = state.selected_user().map(|u| u.id);

        handle_event(&mut state, &Event::ToggleSort).unwrap();

        assert_eq!(visible_names(&state), &["Bob", "alice"]);
        assert_eq!(state.selected_user().map(|u| u.id), followed);
    }

    #[test]
    fn clicking_a_row_opens_its_overlay_and_clicking_outside_closes_it() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());
        state.record_dimensions(24, 80);

        // Second listing row lives on pane line 5 in normal mode.
        handle_event(&mut state, &Event::Click { line: 5, col: 10 }).unwrap();
        assert!(matches!(
            state.overlay,
            Overlay::Details { user_id: 1, .. }
        ));

        // Top-left corner is well outside the centered overlay box.
        handle_event(&mut state, &Event::Click { line: 0, col: 0 }).unwrap();
        assert_eq!(state.overlay, Overlay::Closed);
    }

    #[test]
    fn malformed_payload_is_classified_as_a_decode_failure() {
        let state = fetched_state(200, b"<html>not json</html>");

        assert!(matches!(
            state.phase,
            Phase::Failed(api::FetchError::Decode { .. })
        ));
        assert!(state.users.is_empty());
    }

    #[test]
    fn transport_failure_is_classified_from_the_zero_status() {
        let state = fetched_state(0, b"connection refused");

        assert!(matches!(
            state.phase,
            Phase::Failed(api::FetchError::Transport { .. })
        ));
    }

    #[test]
    fn refetch_keeps_the_search_term() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        handle_event(&mut state, &Event::DebounceElapsed).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let Action::FetchUsers { request_id } = actions[0] else {
            panic!("expected a fetch action");
        };
        handle_event(
            &mut state,
            &Event::UsersFetched {
                request_id,
                status: 200,
                body: PAYLOAD.as_bytes().to_vec(),
            },
        )
        .unwrap();

        assert_eq!(visible_names(&state), &["Bob"]);
    }

    #[test]
    fn quitting_cancels_pending_debounce_updates() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);

        // The already-scheduled timer fires into a cancelled debouncer.
        let (rendered, _) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(!rendered);
        assert_eq!(state.debounced_term.settled(), "");
    }

    #[test]
    fn characters_are_ignored_outside_typing_focus() {
        let mut state = fetched_state(200, PAYLOAD.as_bytes());

        let (rendered, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!rendered);
        assert!(actions.is_empty());
        assert!(state.search_query.is_empty());
    }
}
