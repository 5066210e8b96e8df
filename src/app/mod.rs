//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/query/api layers. It implements
//! the event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Host callbacks (timers, ─────┘
//!                                 fetch responses)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode, overlay and fetch phase state machines
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Overlay, OverlayControl, Phase, SearchFocus};
pub use state::AppState;
