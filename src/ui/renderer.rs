//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view
//! model computation and delegation to UI components. One frame is always
//! header, border, body, border, footer; the body is the listing table, a
//! status screen (loading/error) or an empty state, and the detail overlay
//! is drawn on top when open.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// component renderers. Prints ANSI-styled output; does not clear the screen
/// or manage cursor visibility.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a pre-computed view model.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    // Row 1 stays blank; chrome starts on row 2.
    let mut current_row = 2;

    current_row = components::render_header(current_row, &vm.header, theme, cols);
    current_row = components::render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = components::render_search_bar(current_row, search, theme, cols);
    }

    if let Some(status) = &vm.status {
        components::render_status(status, theme, rows, cols);
    } else if let Some(empty) = &vm.empty_state {
        components::render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = components::render_table_headers(current_row, &vm.sort_indicator, theme);
        components::render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    components::render_border(border_row, &theme.colors.border, cols);
    components::render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(overlay) = &vm.overlay {
        components::render_overlay(overlay, theme, rows, cols);
    }
}
