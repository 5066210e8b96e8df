//! Detail overlay component renderer.
//!
//! Renders a single user's details in a bordered box drawn over the listing.
//! The overlay has two focusable controls (the website line and the Close
//! button); the focused one is drawn with the selection colors so the Tab
//! focus trap is visible.

use crate::app::modes::OverlayControl;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OverlayView;

/// Maximum height of the overlay box, borders included.
const MAX_OVERLAY_HEIGHT: usize = 17;

/// Maximum width of the overlay box, borders included.
const MAX_OVERLAY_WIDTH: usize = 62;

/// One line of overlay content between the borders.
enum Line {
    Blank,
    /// Dimmed section heading.
    Section(&'static str),
    /// "label  value" pair, optionally focusable.
    Field {
        label: &'static str,
        value: String,
        focused: bool,
    },
    /// The centered close button.
    Close { focused: bool },
}

/// Computes the overlay box geometry for the given terminal size.
///
/// Returns `(top, left, height, width)` with 1-indexed top-left corner,
/// centered and clamped to the terminal with a small margin. The event
/// handler hit-tests mouse clicks against the same rectangle, so the two
/// always agree on what "outside the overlay" means.
#[must_use]
pub fn overlay_rect(rows: usize, cols: usize) -> (usize, usize, usize, usize) {
    let height = rows.saturating_sub(4).min(MAX_OVERLAY_HEIGHT);
    let width = cols.saturating_sub(8).min(MAX_OVERLAY_WIDTH);
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    (top, left, height, width)
}

/// Renders the detail overlay over the current frame.
pub fn render_overlay(view: &OverlayView, theme: &Theme, rows: usize, cols: usize) {
    let (top, left, height, width) = overlay_rect(rows, cols);
    if height < 3 || width < 10 {
        return;
    }
    let inner_width = width - 2;

    let lines = content_lines(view);

    position_cursor(top, left);
    print!("{}", Theme::fg(&theme.colors.overlay_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let body_rows = height - 2;
    for offset in 0..body_rows {
        position_cursor(top + 1 + offset, left);
        print!("{}", Theme::fg(&theme.colors.overlay_border));
        print!("│");
        print!("{}", Theme::reset());

        match lines.get(offset) {
            Some(line) => render_line(line, theme, inner_width),
            None => print!("{}", " ".repeat(inner_width)),
        }

        print!("{}", Theme::fg(&theme.colors.overlay_border));
        print!("│");
        print!("{}", Theme::reset());
    }

    position_cursor(top + height - 1, left);
    print!("{}", Theme::fg(&theme.colors.overlay_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}

/// Builds the overlay body, top to bottom.
fn content_lines(view: &OverlayView) -> Vec<Line> {
    vec![
        Line::Field {
            label: "",
            value: view.title.clone(),
            focused: false,
        },
        Line::Section("CONTACT"),
        Line::Field {
            label: "Username",
            value: view.username.clone(),
            focused: false,
        },
        Line::Field {
            label: "Email",
            value: view.email.clone(),
            focused: false,
        },
        Line::Field {
            label: "Phone",
            value: view.phone.clone(),
            focused: false,
        },
        Line::Field {
            label: "Website",
            value: view.website.clone(),
            focused: view.focus == OverlayControl::Website,
        },
        Line::Blank,
        Line::Section("ADDRESS"),
        Line::Field {
            label: "",
            value: view.address.clone(),
            focused: false,
        },
        Line::Blank,
        Line::Section("COMPANY"),
        Line::Field {
            label: "Name",
            value: view.company_name.clone(),
            focused: false,
        },
        Line::Field {
            label: "Motto",
            value: view.catch_phrase.clone(),
            focused: false,
        },
        Line::Blank,
        Line::Close {
            focused: view.focus == OverlayControl::Close,
        },
    ]
}

/// Renders one body line padded to `inner_width`.
fn render_line(line: &Line, theme: &Theme, inner_width: usize) {
    match line {
        Line::Blank => print!("{}", " ".repeat(inner_width)),
        Line::Section(name) => {
            let text = format!(" {name}");
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.overlay_label_fg));
            print!("{}", clip(&text, inner_width));
            print!("{}", " ".repeat(inner_width.saturating_sub(text.chars().count())));
            print!("{}", Theme::reset());
        }
        Line::Field {
            label,
            value,
            focused,
        } => {
            let text = if label.is_empty() {
                format!(" {value}")
            } else {
                format!(" {label:<9} {value}")
            };
            if *focused {
                print!("{}", Theme::fg(&theme.colors.selection_fg));
                print!("{}", Theme::bg(&theme.colors.selection_bg));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print!("{}", clip(&text, inner_width));
            print!("{}", " ".repeat(inner_width.saturating_sub(text.chars().count())));
            print!("{}", Theme::reset());
        }
        Line::Close { focused } => {
            let button = "[ Close ]";
            let padding = inner_width.saturating_sub(button.len()) / 2;
            print!("{}", " ".repeat(padding));
            if *focused {
                print!("{}", Theme::fg(&theme.colors.selection_fg));
                print!("{}", Theme::bg(&theme.colors.selection_bg));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print!("{button}");
            print!("{}", Theme::reset());
            print!(
                "{}",
                " ".repeat(inner_width.saturating_sub(padding + button.len()))
            );
        }
    }
}

/// Truncates a line to the overlay's inner width on char boundaries.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    text.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_rect_is_centered_and_clamped() {
        let (top, left, height, width) = overlay_rect(24, 80);
        assert_eq!(height, 17);
        assert_eq!(width, 62);
        assert_eq!(top, 4);
        assert_eq!(left, 10);

        // Tiny panes clamp instead of underflowing.
        let (_, _, small_height, small_width) = overlay_rect(6, 20);
        assert_eq!(small_height, 2);
        assert_eq!(small_width, 12);
    }

    #[test]
    fn clip_truncates_on_char_boundaries() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("ééééééééé", 5), "éééé…");
    }
}
