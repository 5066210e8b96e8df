//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the plugin, supporting
//! both built-in themes (Catppuccin variants) and custom themes loaded from
//! TOML files. It provides utilities for converting hex colors to ANSI
//! escape sequences.
//!
//! # Built-in themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! overlay_border = "#cba6f7"
//! overlay_label_fg = "#a6adc8"
//! error_fg = "#f38ba8"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{Result, UserdeckError};

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#cdd6f4"). Optional
/// fields default to `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Detail overlay border color.
    pub overlay_border: String,
    /// Detail overlay field label color.
    pub overlay_label_fg: String,

    /// Fetch failure message color.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`,
    /// `catppuccin-frappe`, `catppuccin-macchiato`. Returns `None` for
    /// unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content does
    /// not match the theme schema.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| UserdeckError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple.
    ///
    /// Strips a `#` prefix if present, validates length, and parses hex
    /// digits. Falls back to white on parse errors so a bad color renders
    /// visibly rather than breaking the escape sequence.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn every_builtin_theme_parses() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).expect("builtin theme");
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn unknown_theme_names_yield_none() {
        assert!(Theme::from_name("solarized-dark").is_none());
    }

    #[test]
    fn fg_produces_truecolor_escape() {
        assert_eq!(Theme::fg("#ff0000"), "\u{1b}[38;2;255;0;0m");
        assert_eq!(Theme::fg("00ff00"), "\u{1b}[38;2;0;255;0m");
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::bg("#abc"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg("#zzzzzz"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn loads_custom_theme_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r##"
name = "custom"

[colors]
header_fg = "#cdd6f4"
selection_fg = "#1e1e2e"
selection_bg = "#f5c2e7"
text_normal = "#cdd6f4"
text_dim = "#6c7086"
border = "#45475a"
search_bar_border = "#f5c2e7"
match_highlight_fg = "#1e1e2e"
match_highlight_bg = "#f9e2af"
empty_state_fg = "#89b4fa"
overlay_border = "#cba6f7"
overlay_label_fg = "#a6adc8"
error_fg = "#f38ba8"
"##
        )
        .expect("write theme");

        let theme = Theme::from_file(file.path()).expect("parsable theme");
        assert_eq!(theme.name, "custom");
        assert!(theme.colors.header_bg.is_none());
    }

    #[test]
    fn rejects_incomplete_theme_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#fff\"\n").expect("write theme");

        assert!(matches!(
            Theme::from_file(file.path()),
            Err(UserdeckError::Theme(_))
        ));
    }
}
