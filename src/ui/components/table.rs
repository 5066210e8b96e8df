//! Table component renderer.
//!
//! Renders the user listing as a three-column table (NAME, EMAIL, COMPANY)
//! with selection highlighting and search match highlighting on the name
//! column. The NAME header carries the sort direction indicator.

use crate::app::state::{EMAIL_COLUMN_WIDTH, NAME_COLUMN_WIDTH};
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the table column headers at the specified row.
///
/// The NAME column shows the current sort direction next to the label.
/// Returns the next available row.
pub fn render_table_headers(row: usize, sort_indicator: &str, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let name_header = format!("NAME {sort_indicator}");
    print!(
        "{:<name_width$} {:<email_width$} {}",
        name_header,
        "EMAIL",
        "COMPANY",
        name_width = NAME_COLUMN_WIDTH,
        email_width = EMAIL_COLUMN_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all listing rows starting at the specified row.
///
/// Returns the next available row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single listing row.
///
/// Styling precedence: selection background over the whole row, then search
/// match highlighting on the name, then normal text. The row is padded to
/// the full terminal width so the selection background covers the line.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    if item.highlight_ranges.is_empty() {
        print!("{}", item.name);
    } else {
        helpers::render_highlighted_text(
            &item.name,
            &item.highlight_ranges,
            theme,
            item.is_selected,
        );
    }

    let name_len = item.name.chars().count().min(NAME_COLUMN_WIDTH);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(name_len) + 1));

    print!("{}", item.email);
    let email_len = item.email.chars().count().min(EMAIL_COLUMN_WIDTH);
    print!("{}", " ".repeat(EMAIL_COLUMN_WIDTH.saturating_sub(email_len) + 1));

    print!("{}", item.company);

    let line_len = NAME_COLUMN_WIDTH + EMAIL_COLUMN_WIDTH + 2 + item.company.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
