//! Status screen component renderer.
//!
//! Renders the full-body screens that replace the listing wholesale: the
//! loading indicator while a fetch is in flight, and the classified fetch
//! failure with its retry hint. Partial results are never shown next to
//! either.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Renders a status screen centered in the body area.
///
/// The message uses the error color for failures and the normal text color
/// otherwise; the detail line is dimmed below it.
pub fn render_status(status: &StatusInfo, theme: &Theme, rows: usize, cols: usize) {
    let message_row = (rows / 2).saturating_sub(1).max(5);
    let message_color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_normal
    };

    let msg_len = status.message.chars().count();
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(message_row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(message_color));
    print!("{}", " ".repeat(msg_padding));
    print!("{}", status.message);
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let detail_len = status.detail.chars().count();
    let detail_padding = cols.saturating_sub(detail_len) / 2;

    position_cursor(message_row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(detail_padding));
    print!("{}", status.detail);
    print!("{}", " ".repeat(cols.saturating_sub(detail_padding + detail_len)));
    print!("{}", Theme::reset());
}
