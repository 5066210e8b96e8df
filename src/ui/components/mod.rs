//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with directory count and freshness
//! - [`footer`]: Keybinding hints for the active mode
//! - [`search`]: Search input box (border, live query text)
//! - [`table`]: User listing with NAME, EMAIL and COMPANY columns
//! - [`empty`]: Empty state message for no items / no matches
//! - [`status`]: Full-body loading and fetch-failure screens
//! - [`modal`]: Detail overlay for a single user
//!
//! The renderer sequences these into the final frame; components only draw
//! their own rows.

mod empty;
mod footer;
mod header;
mod modal;
mod search;
mod status;
mod table;

pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;
pub use modal::{overlay_rect, render_overlay};
pub use search::render_search_bar;
pub use status::render_status;
pub use table::{render_table_headers, render_table_rows};

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/table, table/footer).
///
/// Returns the next available row position.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}
