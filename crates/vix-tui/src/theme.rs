//! Terminal colors.
//!
//! Colors come from the `[ui]` config section as names (`"red"`,
//! `"darkgrey"`) or hex strings (`"#ff8800"`). An unknown name falls back to
//! the default for that slot and logs a warning.

use crossterm::style::Color;
use vix_core::config::UiConfig;

/// Color lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown color: {0}")]
    UnknownColor(String),
}

/// Colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Foreground of keyword spans
    pub keyword: Color,
    /// Background of the status line
    pub status_bg: Color,
    /// Foreground of the status line
    pub status_fg: Color,
    /// Foreground of the line-number gutter
    pub gutter: Color,
}

impl Theme {
    /// Builds a theme from config, falling back per slot.
    pub fn from_config(ui: &UiConfig) -> Self {
        let defaults = Self::default();
        Self {
            keyword: color_or(&ui.keyword_color, defaults.keyword),
            status_bg: color_or(&ui.status_color, defaults.status_bg),
            ..defaults
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            keyword: Color::Red,
            status_bg: Color::DarkGrey,
            status_fg: Color::White,
            gutter: Color::DarkGrey,
        }
    }
}

fn color_or(name: &str, fallback: Color) -> Color {
    parse_color(name).unwrap_or_else(|e| {
        tracing::warn!("{}, using {:?}", e, fallback);
        fallback
    })
}

/// Parses a color name or `#rrggbb` string.
pub fn parse_color(name: &str) -> Result<Color, ThemeError> {
    let normalized = name.trim().to_lowercase().replace(['_', '-', ' '], "");
    let color = match normalized.as_str() {
        "black" => Color::Black,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        hex => return parse_hex(hex).ok_or_else(|| ThemeError::UnknownColor(name.to_string())),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_color("red"), Ok(Color::Red));
        assert_eq!(parse_color("DarkGrey"), Ok(Color::DarkGrey));
        assert_eq!(parse_color("dark_grey"), Ok(Color::DarkGrey));
        assert_eq!(
            parse_color("#ff8800"),
            Ok(Color::Rgb {
                r: 255,
                g: 136,
                b: 0
            })
        );
        assert!(parse_color("#ff88").is_err());
        assert!(parse_color("chartreuse").is_err());
    }

    #[test]
    fn test_theme_from_config_falls_back() {
        let ui = UiConfig {
            keyword_color: "blue".to_string(),
            status_color: "nonsense".to_string(),
            ..UiConfig::default()
        };
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.keyword, Color::Blue);
        assert_eq!(theme.status_bg, Color::DarkGrey);
    }
}
