//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Actions bridge pure state transitions and effectful host operations:
//! issuing the HTTP fetch, scheduling debounce timers, and closing the pane.
//! The plugin shim (main.rs) translates each action into the corresponding
//! Zellij API call.

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Fetches the user collection from the configured endpoint.
    ///
    /// The shim forwards `request_id` through the host request's context map
    /// so the eventual response can be matched against the latest issued
    /// fetch and stale responses dropped.
    FetchUsers {
        /// Identity of this fetch, issued by the request guard.
        request_id: u64,
    },

    /// Schedules one debounce timer on the host event loop.
    ///
    /// Timers of equal delay fire in FIFO order; the application keeps a
    /// queue of scheduled debounce generations and pops one per timer event.
    StartDebounceTimer {
        /// Delay before the timer fires, in milliseconds.
        delay_ms: u64,
    },
}
