//! User interface rendering layer with component-based architecture.
//!
//! This module orchestrates the terminal-based UI, transforming view models
//! into ANSI-styled output through composable rendering components. It
//! provides theme support, responsive layout, search match highlighting and
//! the detail overlay.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, freshness)
//! - [`theme`]: Color scheme definitions and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, OverlayView, SearchBarInfo, StatusInfo,
    UIViewModel,
};
