//! Mode and lifecycle state types for the application.
//!
//! This module defines the small state machines that control user
//! interaction: the input mode (normal vs. search), the detail overlay
//! lifecycle with its focus trap, and the fetch phase. All of them are plain
//! enums so that impossible combinations ("error without a message", "modal
//! without a remembered trigger") are unrepresentable.

use crate::api::FetchError;

/// Focus state within search mode.
///
/// Determines whether keystrokes edit the query or navigate the filtered
/// results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    Typing,
    /// User is navigating through the filtered listing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and which footer hints are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,
    /// Active search mode with focus state.
    Search(SearchFocus),
}

/// A focusable control inside the detail overlay.
///
/// Tab cycles forward through the controls, Shift+Tab backward, both
/// wrapping; this is the overlay's focus trap: while the overlay is open
/// focus never leaves these controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayControl {
    /// The close affordance; focused first when the overlay opens.
    Close,
    /// The user's website line.
    Website,
}

impl OverlayControl {
    /// The control after this one in Tab order (wraps).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Close => Self::Website,
            Self::Website => Self::Close,
        }
    }

    /// The control before this one in Tab order (wraps).
    #[must_use]
    pub const fn previous(self) -> Self {
        // Two controls: backwards is the same wrap as forwards.
        self.next()
    }
}

/// Detail overlay lifecycle.
///
/// Opening remembers the listing row that triggered it so the close
/// transition can restore keyboard focus there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// No overlay; keys drive the listing.
    Closed,
    /// Overlay showing one user's details.
    Details {
        /// Identity of the displayed user within the current collection.
        user_id: u64,
        /// Listing index of the row that opened the overlay; selection
        /// returns here on close.
        trigger_index: usize,
        /// Currently focused overlay control.
        focus: OverlayControl,
    },
}

impl Overlay {
    /// Whether the overlay is currently shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Details { .. })
    }
}

/// Fetch lifecycle of the user collection.
///
/// The listing is rendered only in `Ready`; the other phases replace it
/// wholesale with a status screen, so partial results are never shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// A fetch is in flight; derived-state computation is skipped.
    Loading,
    /// The collection is populated and the listing is interactive.
    Ready,
    /// The last fetch failed; carries the classified error and implies the
    /// retry affordance.
    Failed(FetchError),
}

impl Phase {
    /// Whether the listing is available for navigation and filtering.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}
