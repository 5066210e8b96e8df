//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple
//! UI components: cursor positioning, search match highlighting with proper
//! ANSI escape sequence management, and the header's freshness label.

use crate::ui::theme::Theme;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Positions the cursor at a specific row and column.
///
/// Uses the ANSI escape sequence `\x1b[{row};{col}H`. Coordinates are
/// 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for search matches.
///
/// Splits the text into highlighted and normal sections based on the
/// provided character ranges. Highlighted sections use the match highlight
/// colors unless the row is selected, in which case the selection background
/// takes precedence and highlighting is suppressed.
///
/// Ranges are `(start, end)` char indices (exclusive end), non-overlapping
/// and ordered, as produced by [`crate::query::match_ranges`].
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        if start >= chars.len() {
            break;
        }
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end.min(chars.len())].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Returns a human-readable label for how long ago a timestamp was.
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - Otherwise: "Xd ago"
///
/// # Examples
///
/// ```
/// use userdeck::ui::helpers::freshness_label;
///
/// assert_eq!(freshness_label(1_000, 1_030), "just now");
/// assert_eq!(freshness_label(1_000, 1_000 + 300), "5m ago");
/// ```
#[must_use]
pub fn freshness_label(fetched_at: i64, now: i64) -> String {
    let diff = (now - fetched_at).max(0);

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_label_buckets() {
        assert_eq!(freshness_label(0, 59), "just now");
        assert_eq!(freshness_label(0, 60), "1m ago");
        assert_eq!(freshness_label(0, 3 * SECONDS_PER_HOUR + 7), "3h ago");
        assert_eq!(freshness_label(0, 2 * SECONDS_PER_DAY), "2d ago");
    }

    #[test]
    fn freshness_label_never_goes_negative() {
        // A clock skew should not render a nonsense label.
        assert_eq!(freshness_label(100, 50), "just now");
    }
}
