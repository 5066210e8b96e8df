//! Search bar component renderer.
//!
//! Renders the search input box with a bordered frame and the live query
//! text. The box shows the raw query as typed; the listing below follows the
//! debounced copy of it.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// Displays a 3-line bordered box containing the query. Returns the next
/// available row position (row + 3).
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    // Trailing block marks the insertion point; input is append/pop only.
    let search_text = format!(" Search: {}█", search.query);
    let padding = inner_width.saturating_sub(search_text.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
