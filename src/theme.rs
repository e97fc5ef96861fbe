//! Theme provider: a flat palette and font record.
//!
//! Every widget reads its colors from a [`Theme`]. Nothing in the table core
//! mutates a theme; switching modes means building a new one.

use std::fmt;
use std::str::FromStr;

use crate::render::strip::CellStyle;

/// Errors from theme construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("unsupported theme mode: {0} (choose 'dark' or 'light')")]
    UnsupportedMode(String),
}

// ---------------------------------------------------------------------------
// ThemeMode
// ---------------------------------------------------------------------------

/// The built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ThemeError::UnsupportedMode(other.to_owned())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => f.write_str("dark"),
            ThemeMode::Light => f.write_str("light"),
        }
    }
}

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

/// Font family and point size.
///
/// Terminals ignore both; the record is carried so hosts that draw on a
/// pixel surface can honor it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub family: String,
    pub size: u16,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Helvetica".to_owned(),
            size: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Read-only color and font tokens.
///
/// Colors are `#rrggbb` hex strings or named colors, the same format the
/// terminal driver parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Window / surface background.
    pub background: String,
    /// Base fill for interactive cells.
    pub widget_bg: String,
    pub border: String,
    pub hover: String,
    pub active: String,
    /// Fill for selected cells.
    pub focus: String,
    pub accent: String,
    pub text: String,
    pub placeholder: String,
    pub font: Font,
}

impl Theme {
    /// Build the palette for a mode.
    pub fn new(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                mode,
                background: "#222222".into(),
                widget_bg: "#2b2b2b".into(),
                border: "#3c3c3c".into(),
                hover: "#3c3c3c".into(),
                active: "#1a1a1a".into(),
                focus: "#5e5e5e".into(),
                accent: "#4da6ff".into(),
                text: "white".into(),
                placeholder: "#777777".into(),
                font: Font::default(),
            },
            ThemeMode::Light => Self {
                mode,
                background: "#f0f0f0".into(),
                widget_bg: "#ffffff".into(),
                border: "#cccccc".into(),
                hover: "#e0e0e0".into(),
                active: "#cccccc".into(),
                focus: "#888888".into(),
                accent: "#007aff".into(),
                text: "#000000".into(),
                placeholder: "#aaaaaa".into(),
                font: Font::default(),
            },
        }
    }

    pub fn dark() -> Self {
        Self::new(ThemeMode::Dark)
    }

    pub fn light() -> Self {
        Self::new(ThemeMode::Light)
    }

    /// Build a theme from a mode name such as `"dark"` or `"light"`.
    pub fn from_name(name: &str) -> Result<Self, ThemeError> {
        Ok(Self::new(name.parse()?))
    }

    /// Text-colored style on the given fill.
    pub fn style_on(&self, background: &str) -> CellStyle {
        CellStyle {
            fg: Some(self.text.clone()),
            bg: Some(background.to_owned()),
            bold: false,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
