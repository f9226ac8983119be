//! Color themes and ANSI escape sequences.
//!
//! Two themes are built in: `evergreen` (the default, dark greens with a blue
//! accent) and `catppuccin-mocha`. Custom themes are TOML files:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f7f8f7"
//! header_bg = "#15372c"        # optional
//! selection_fg = "#f7f8f7"
//! selection_bg = "#047957"
//! text_normal = "#e1e1e1"
//! text_dim = "#909090"
//! border = "#3d5a4f"
//! search_bar_border = "#047957"
//! match_highlight_fg = "#15372c"
//! match_highlight_bg = "#9fe0c4"
//! empty_state_fg = "#6fcf97"
//! status_fg = "#3574d6"
//! error_fg = "#f2555a"
//! filter_checked_fg = "#6fcf97"
//! ```

use crate::domain::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "evergreen";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, subtitles, disabled controls.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Application status column.
    pub status_fg: String,
    /// Failed fetch messages.
    pub error_fg: String,
    /// Checked filter options.
    pub filter_checked_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name, `None` if the name is unknown.
    ///
    /// ```
    /// use candidate_browser::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-mocha").unwrap().name, "catppuccin-mocha");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "evergreen" => include_str!("../../themes/evergreen.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Io`] if the file cannot be read and
    /// [`BrowserError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| BrowserError::Theme(format!("invalid theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; anything else renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color sequence.
    ///
    /// ```
    /// use candidate_browser::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#047957"), "\u{1b}[38;2;4;121;87m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The built-in `evergreen` theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in evergreen theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        for name in ["evergreen", "catppuccin-mocha"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn invalid_hex_falls_back_to_white() {
        assert_eq!(Theme::hex_to_rgb("#12345"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("zzzzzz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#ÿÿÿ"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("15372c"), (0x15, 0x37, 0x2c));
    }

    #[test]
    fn theme_file_round_trip_and_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let contents = toml::to_string(&Theme::default()).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        assert_eq!(Theme::from_file(file.path()).unwrap(), Theme::default());

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        broken.write_all(b"name = \"half\"\n").unwrap();
        assert!(matches!(Theme::from_file(broken.path()), Err(BrowserError::Theme(_))));

        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(BrowserError::Io(_))
        ));
    }
}
