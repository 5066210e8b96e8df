//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application
//! state. View models are created via `AppState::compute_viewmodel()` and
//! consumed by the renderer; they contain no business logic, only
//! display-ready data such as pre-computed highlight ranges and truncated
//! columns.

use crate::app::modes::OverlayControl;

/// Complete UI view model for rendering.
///
/// At most one of `status`, `empty_state` and `display_items` is meaningful
/// for the body area: a status screen (loading/error) replaces the listing
/// wholesale, an empty state replaces an empty listing, otherwise the
/// display items are rendered as a table. The overlay, when present, is
/// drawn on top.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows of the visible listing window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Header information (title, count, freshness).
    pub header: HeaderInfo,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,

    /// Search input box state, present while in search mode.
    pub search_bar: Option<SearchBarInfo>,

    /// Indicator rendered next to the NAME column header ("▲" / "▼").
    pub sort_indicator: String,

    /// Full-body status screen (loading or fetch failure).
    pub status: Option<StatusInfo>,

    /// Empty-listing message (no users, or no matches for the search term).
    pub empty_state: Option<EmptyState>,

    /// Detail overlay, drawn over the listing when open.
    pub overlay: Option<OverlayView>,
}

/// Display information for a single listing row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Name column, truncated to the column width.
    pub name: String,

    /// Email column, truncated to the column width.
    pub email: String,

    /// Company column.
    pub company: String,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of the name matching the search term, `(start, end)`
    /// char indices with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the active mode.
    pub keybindings: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current (live, not debounced) search query text.
    pub query: String,
}

/// Full-body status screen shown while loading or after a fetch failure.
#[derive(Debug, Clone)]
pub struct StatusInfo {
    /// Primary message (e.g. the classified fetch error).
    pub message: String,

    /// Secondary line (e.g. the retry hint).
    pub detail: String,

    /// Renders the message in the error color when set.
    pub is_error: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g. "No users match ...").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Detail overlay content for a single user.
#[derive(Debug, Clone)]
pub struct OverlayView {
    /// Overlay title: the user's name.
    pub title: String,

    /// Login handle.
    pub username: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: String,

    /// Website line; one of the overlay's focusable controls.
    pub website: String,

    /// Full postal address on one line.
    pub address: String,

    /// Company name.
    pub company_name: String,

    /// Company catch-phrase.
    pub catch_phrase: String,

    /// Which overlay control currently holds focus.
    pub focus: OverlayControl,
}
