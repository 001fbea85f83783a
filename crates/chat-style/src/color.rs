#![forbid(unsafe_code)]

//! Chat colors and the legacy marker alphabet.
//!
//! Legacy text encodes style as a flat stream of two-character markers: the
//! section sign [`SECTION_SIGN`] followed by a single code character. Colors
//! use the hex digits `0-9a-f`, formats use `k-o`, and `r` resets.
//!
//! ```
//! use chat_style::ChatColor;
//!
//! assert_eq!(ChatColor::Red.to_string(), "\u{a7}c");
//! assert_eq!(ChatColor::from_code('C'), Some(ChatColor::Red));
//! ```

use std::fmt;
use std::str::FromStr;

/// Marker character introducing every legacy style code.
pub const SECTION_SIGN: char = '\u{a7}';

/// All code characters recognized after a [`SECTION_SIGN`] (lowercase).
pub const ALL_CODES: &str = "0123456789abcdefklmnor";

/// A named chat color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    /// Clears color and every format on the client.
    Reset,
}

impl ChatColor {
    /// Every color in code order.
    pub const ALL: [ChatColor; 17] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
        Self::Reset,
    ];

    /// The code character written after the section sign.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
            Self::Reset => 'r',
        }
    }

    /// Look up a color by its code character (case-insensitive).
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.into_iter().find(|color| color.code() == code)
    }

    /// The snake_case name used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Reset => "reset",
        }
    }

    /// Append this color's marker to `out`.
    #[inline]
    pub fn write_marker(self, out: &mut String) {
        out.push(SECTION_SIGN);
        out.push(self.code());
    }
}

impl fmt::Display for ChatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SECTION_SIGN}{}", self.code())
    }
}

/// Error returned when a color name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chat color: {}", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl FromStr for ChatColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// Remove every section-sign marker with a recognized code from `text`.
///
/// A section sign followed by an unknown character, or at the very end of the
/// input, is kept as-is.
#[must_use]
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == SECTION_SIGN
            && let Some(&next) = chars.peek()
            && ALL_CODES.contains(next.to_ascii_lowercase())
        {
            chars.next();
            continue;
        }
        out.push(ch);
    }
    out
}
