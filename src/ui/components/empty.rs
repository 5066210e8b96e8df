//! Empty state component renderer.
//!
//! Renders the message shown when the listing has nothing to display: the
//! endpoint returned no users, or the search term matched none of them.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message starting at `row`.
///
/// Both lines are horizontally centered: the message in the empty-state
/// color, the subtitle dimmed one row below.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let msg_len = empty.message.chars().count();
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", empty.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let sub_len = empty.subtitle.chars().count();
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
