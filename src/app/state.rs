//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin, along with the derived-list recomputation and UI view model
//! generation. It is the single source of truth for all transient UI state.
//!
//! # Derived list invariant
//!
//! `visible_users` is always exactly
//! `sort_by_name(filter_by_name(users, debounced_term), sort_direction)`:
//! filter before sort, recomputed from the full collection whenever one of
//! those three inputs changes, never patched incrementally. While a fetch is
//! in flight or failed, the derived list is empty and the body renders a
//! status screen instead.
//!
//! # State components
//!
//! - **Users**: master collection from the last successful fetch, replaced
//!   wholesale on refetch
//! - **Visible users**: the derived list described above
//! - **Selection**: cursor position within the visible listing
//! - **Search**: live query string plus its debounced shadow
//! - **Overlay**: detail overlay lifecycle with focus trap state
//! - **Phase**: fetch lifecycle (loading / ready / failed)

use std::collections::VecDeque;

use crate::api::RequestGuard;
use crate::debounce::Debouncer;
use crate::domain::User;
use crate::query::{filter_by_name, match_ranges, sort_by_name, SortDirection};
use crate::ui::helpers::freshness_label;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, OverlayView, SearchBarInfo, StatusInfo,
    UIViewModel,
};

use super::modes::{InputMode, Overlay, Phase, SearchFocus};

/// Width of the NAME column in the listing table.
pub(crate) const NAME_COLUMN_WIDTH: usize = 32;

/// Width of the EMAIL column in the listing table.
pub(crate) const EMAIL_COLUMN_WIDTH: usize = 30;

/// First terminal row (1-indexed) of listing items in normal mode.
pub(crate) const TABLE_START_ROW_NORMAL: usize = 5;

/// First terminal row (1-indexed) of listing items in search mode (the
/// search box adds three rows of chrome).
pub(crate) const TABLE_START_ROW_SEARCH: usize = 8;

/// Central application state container.
///
/// Mutated by the event handler in response to user input and host events.
/// View models are computed on demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Master collection from the last successful fetch.
    pub users: Vec<User>,

    /// The derived list: filtered by the debounced term, then sorted.
    pub visible_users: Vec<User>,

    /// Zero-based index of the selected row within `visible_users`.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Live search query, updated on every keystroke. Only its debounced
    /// shadow in `debounced_term` feeds the filter engine.
    pub search_query: String,

    /// Time-lagged copy of the query; the filter engine's only term input.
    pub debounced_term: Debouncer<String>,

    /// FIFO queue of debounce generations with a host timer outstanding.
    /// Host timers of equal delay fire in order, so one generation is popped
    /// per `Timer` event. Entries are never removed out of band; a
    /// superseded generation pops as a stale no-op.
    pub debounce_timers: VecDeque<u64>,

    /// Debounce delay in milliseconds, from configuration.
    pub debounce_ms: u64,

    /// Ordering of the listing.
    pub sort_direction: SortDirection,

    /// Detail overlay lifecycle.
    pub overlay: Overlay,

    /// Fetch lifecycle of the user collection.
    pub phase: Phase,

    /// Issues fetch ids and rejects responses from superseded fetches.
    pub fetch_guard: RequestGuard,

    /// Unix timestamp of the last successful fetch, for the header
    /// freshness label.
    pub fetched_at: Option<i64>,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Terminal dimensions recorded at the last render, used to hit-test
    /// mouse clicks against the same layout the user saw.
    pub last_rows: usize,
    pub last_cols: usize,
}

impl AppState {
    /// Creates the initial application state.
    ///
    /// The plugin starts in the loading phase: the first fetch is issued
    /// right after permissions are granted, and the listing stays hidden
    /// until it resolves.
    #[must_use]
    pub fn new(theme: Theme, debounce_ms: u64) -> Self {
        Self {
            users: Vec::new(),
            visible_users: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            debounced_term: Debouncer::new(String::new()),
            debounce_timers: VecDeque::new(),
            debounce_ms,
            sort_direction: SortDirection::default(),
            overlay: Overlay::Closed,
            phase: Phase::Loading,
            fetch_guard: RequestGuard::new(),
            fetched_at: None,
            theme,
            last_rows: 0,
            last_cols: 0,
        }
    }

    /// Moves the selection down one row, wrapping to the top at the end.
    pub fn move_selection_down(&mut self) {
        if self.visible_users.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible_users.len();
    }

    /// Moves the selection up one row, wrapping to the bottom at the start.
    pub fn move_selection_up(&mut self) {
        if self.visible_users.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible_users.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The currently selected user, if the listing is non-empty.
    #[must_use]
    pub fn selected_user(&self) -> Option<&User> {
        self.visible_users.get(self.selected_index)
    }

    /// Recomputes the derived list from its three inputs.
    ///
    /// Outside the `Ready` phase the listing is cleared: a pending fetch
    /// shows the loading screen and a failed fetch shows the error screen,
    /// never partial results. The selection is clamped to the new bounds.
    pub fn recompute_listing(&mut self) {
        if !self.phase.is_ready() {
            self.visible_users.clear();
            self.selected_index = 0;
            return;
        }

        let _span = tracing::debug_span!(
            "recompute_listing",
            total_users = self.users.len(),
            term_len = self.debounced_term.settled().len(),
            direction = ?self.sort_direction,
        )
        .entered();

        let filtered = filter_by_name(&self.users, self.debounced_term.settled());
        self.visible_users = sort_by_name(&filtered, self.sort_direction);

        if self.visible_users.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible_users.len() - 1);
        }

        tracing::debug!(visible = self.visible_users.len(), "listing recomputed");
    }

    /// Records the terminal dimensions seen by the renderer, so mouse
    /// clicks can be hit-tested against the rendered layout.
    pub fn record_dimensions(&mut self, rows: usize, cols: usize) {
        self.last_rows = rows;
        self.last_cols = cols;
    }

    /// First terminal row (1-indexed) of listing items in the current mode.
    pub(crate) const fn table_start_row(&self) -> usize {
        match self.input_mode {
            InputMode::Normal => TABLE_START_ROW_NORMAL,
            InputMode::Search(_) => TABLE_START_ROW_SEARCH,
        }
    }

    /// Rows available for listing items after subtracting UI chrome.
    const fn available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(6),
            InputMode::Search(_) => total_rows.saturating_sub(9),
        }
    }

    /// Computes the visible window `(start, end)` into `visible_users`,
    /// keeping the selection near the middle where possible.
    pub(crate) fn visible_window(&self, total_rows: usize) -> (usize, usize) {
        let available = self.available_rows(total_rows);
        if available == 0 || self.visible_users.is_empty() {
            return (0, 0);
        }

        let mut start = self.selected_index.saturating_sub(available / 2);
        let end = (start + available).min(self.visible_users.len());

        let shown = end - start;
        if shown < available && self.visible_users.len() >= available {
            start = end.saturating_sub(available);
        }

        (start, end)
    }

    /// Maps a clicked pane line (0-indexed, as delivered by mouse events) to
    /// an index into `visible_users`, using the dimensions of the last
    /// render.
    #[must_use]
    pub fn row_to_index(&self, line: isize) -> Option<usize> {
        if !self.phase.is_ready() || line < 0 {
            return None;
        }

        #[allow(clippy::cast_sign_loss)]
        let row = line as usize + 1;
        let start_row = self.table_start_row();
        if row < start_row {
            return None;
        }

        let (window_start, window_end) = self.visible_window(self.last_rows);
        let index = window_start + (row - start_row);
        (index < window_end).then_some(index)
    }

    /// Computes a renderable view model from current state and terminal
    /// dimensions.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let mut viewmodel = UIViewModel {
            display_items: Vec::new(),
            selected_index: 0,
            header: self.compute_header(),
            footer: self.compute_footer(),
            search_bar: self.compute_search_bar(),
            sort_indicator: self.sort_direction.indicator().to_string(),
            status: self.compute_status(),
            empty_state: None,
            overlay: self.compute_overlay(),
        };

        if viewmodel.status.is_some() {
            return viewmodel;
        }

        if self.visible_users.is_empty() {
            viewmodel.empty_state = Some(self.compute_empty_state());
            return viewmodel;
        }

        let (start, end) = self.visible_window(rows);
        let term = self.debounced_term.settled().clone();

        viewmodel.display_items = self.visible_users[start..end]
            .iter()
            .enumerate()
            .map(|(offset, user)| self.compute_display_item(user, start + offset, cols, &term))
            .collect();
        viewmodel.selected_index = self.selected_index.saturating_sub(start);

        viewmodel
    }

    /// Builds one listing row: truncated columns plus highlight ranges for
    /// the portion of the name matching the search term.
    fn compute_display_item(
        &self,
        user: &User,
        absolute_index: usize,
        cols: usize,
        term: &str,
    ) -> DisplayItem {
        let highlight_ranges = if term.trim().is_empty() {
            Vec::new()
        } else {
            match_ranges(&user.name, term)
        };

        // The company column absorbs whatever width the terminal has left.
        let company_width = cols.saturating_sub(NAME_COLUMN_WIDTH + EMAIL_COLUMN_WIDTH + 2);

        DisplayItem {
            name: truncate(&user.name, NAME_COLUMN_WIDTH - 2),
            email: truncate(&user.email, EMAIL_COLUMN_WIDTH - 2),
            company: truncate(&user.company.name, company_width),
            is_selected: absolute_index == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let mut title = if self.phase.is_ready() {
            format!(" User Directory ({}) ", self.visible_users.len())
        } else {
            " User Directory ".to_string()
        };

        if let Some(fetched_at) = self.fetched_at {
            let now = chrono::Utc::now().timestamp();
            title.push_str(&format!("· refreshed {} ", freshness_label(fetched_at, now)));
        }

        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.overlay.is_open() {
            "Tab/Shift+Tab: cycle focus  Enter: activate  ESC: close".to_string()
        } else {
            match (&self.phase, self.input_mode) {
                (Phase::Loading, _) => "q: quit".to_string(),
                (Phase::Failed(_), _) => "r: retry  q: quit".to_string(),
                (Phase::Ready, InputMode::Search(SearchFocus::Typing)) => {
                    "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
                        .to_string()
                }
                (Phase::Ready, InputMode::Search(SearchFocus::Navigating)) => {
                    "ESC: exit search  /: edit query  j/k or Ctrl+n/p: navigate  Enter: details"
                        .to_string()
                }
                (Phase::Ready, InputMode::Normal) => {
                    "j/k or Ctrl+n/p: navigate  /: search  s: sort  r: refresh  Enter: details  q: quit"
                        .to_string()
                }
            }
        };

        FooterInfo { keybindings }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        matches!(self.input_mode, InputMode::Search(_)).then(|| SearchBarInfo {
            query: self.search_query.clone(),
        })
    }

    fn compute_status(&self) -> Option<StatusInfo> {
        match &self.phase {
            Phase::Loading => Some(StatusInfo {
                message: "Loading users...".to_string(),
                detail: "Fetching the directory from the configured endpoint".to_string(),
                is_error: false,
            }),
            Phase::Failed(error) => Some(StatusInfo {
                message: error.to_string(),
                detail: "Press r to retry".to_string(),
                is_error: true,
            }),
            Phase::Ready => None,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let term = self.debounced_term.settled().trim();
        if self.users.is_empty() {
            EmptyState {
                message: "Directory is empty".to_string(),
                subtitle: "The endpoint returned no users".to_string(),
            }
        } else {
            EmptyState {
                message: format!("No users match \"{term}\""),
                subtitle: "Press ESC to clear the search".to_string(),
            }
        }
    }

    fn compute_overlay(&self) -> Option<OverlayView> {
        let Overlay::Details { user_id, focus, .. } = self.overlay else {
            return None;
        };

        // The collection is replaced wholesale on refetch and the overlay is
        // closed with it, so a missing id only happens transiently.
        let user = self.users.iter().find(|u| u.id == user_id)?;

        Some(OverlayView {
            title: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            website: user.website.clone(),
            address: user.full_address(),
            company_name: user.company.name.clone(),
            catch_phrase: user.company.catch_phrase.clone(),
            focus,
        })
    }
}

/// Truncates to at most `max` characters, appending "..." when shortened.
/// Operates on char boundaries so multi-byte names never split.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
