//! Color values used by run formatting (shared by reading and writing).

use std::fmt;
use std::str::FromStr;

/// A text highlight color (`<w:highlight w:val="..."/>`).
///
/// The variants cover the full WordprocessingML highlight palette. Parsing
/// also accepts the legacy menu spellings (`bright_green`, `pink`,
/// `turquoise`, ...) that map onto this palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightColor {
    Yellow,
    Green,
    Cyan,
    Magenta,
    Blue,
    Red,
    DarkBlue,
    DarkCyan,
    DarkGreen,
    DarkMagenta,
    DarkRed,
    DarkYellow,
    DarkGray,
    LightGray,
    Black,
    White,
}

impl HighlightColor {
    /// The `w:val` attribute value for this color.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::DarkBlue => "darkBlue",
            Self::DarkCyan => "darkCyan",
            Self::DarkGreen => "darkGreen",
            Self::DarkMagenta => "darkMagenta",
            Self::DarkRed => "darkRed",
            Self::DarkYellow => "darkYellow",
            Self::DarkGray => "darkGray",
            Self::LightGray => "lightGray",
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// Parse a highlight color from a `w:val` value or a menu spelling.
    ///
    /// Matching is case-insensitive and ignores `_` and `-` separators, so
    /// `darkBlue`, `dark_blue` and `DARK-BLUE` all parse to [`Self::DarkBlue`].
    /// Returns `None` for unknown names and for `none`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut key = String::with_capacity(s.len());
        for c in s.chars().filter(|c| *c != '_' && *c != '-') {
            key.push(c.to_ascii_lowercase());
        }
        Some(match key.as_str() {
            "yellow" => Self::Yellow,
            "green" | "brightgreen" => Self::Green,
            "cyan" | "turquoise" => Self::Cyan,
            "magenta" | "pink" => Self::Magenta,
            "blue" => Self::Blue,
            "red" => Self::Red,
            "darkblue" => Self::DarkBlue,
            "darkcyan" | "teal" => Self::DarkCyan,
            "darkgreen" => Self::DarkGreen,
            "darkmagenta" | "violet" => Self::DarkMagenta,
            "darkred" => Self::DarkRed,
            "darkyellow" => Self::DarkYellow,
            "darkgray" | "gray50" => Self::DarkGray,
            "lightgray" | "gray25" => Self::LightGray,
            "black" => Self::Black,
            "white" => Self::White,
            _ => return None,
        })
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightColor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown highlight color '{s}'"))
    }
}

/// An RGB font color (`<w:color w:val="RRGGBB"/>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Parse a 6-digit hex value. Returns `None` for `auto` and anything
    /// else that is not exactly six hex digits.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self(r, g, b))
    }

    /// Format as the 6-digit uppercase hex used in `w:val`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}
