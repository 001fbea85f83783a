#![forbid(unsafe_code)]

//! Style attributes with parent-to-child inheritance.
//!
//! Every attribute of a [`Style`] is optional. An unset attribute inherits the
//! parent's value; [`Style::inherit`] performs one step of that cascade. A
//! style whose inheritance reached the root is *effective*: unset flags then
//! read as `false` and an unset color means "no color".
//!
//! ```
//! use chat_style::{ChatColor, Style};
//!
//! let parent = Style::new().color(ChatColor::Red).bold(true);
//! let child = Style::new().bold(false).inherit(&parent);
//!
//! assert_eq!(child.color, Some(ChatColor::Red));
//! assert!(!child.is_bold());
//! assert_eq!(child.legacy_codes(), "\u{a7}c");
//! ```

use crate::color::{ChatColor, SECTION_SIGN};

/// A boolean text format with its own legacy marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Bold,
    Italic,
    Underlined,
    Strikethrough,
    Obfuscated,
}

impl Format {
    /// Formats in the order their markers are emitted.
    pub const ORDER: [Format; 5] = [
        Self::Bold,
        Self::Italic,
        Self::Underlined,
        Self::Strikethrough,
        Self::Obfuscated,
    ];

    /// The code character written after the section sign.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Bold => 'l',
            Self::Italic => 'o',
            Self::Underlined => 'n',
            Self::Strikethrough => 'm',
            Self::Obfuscated => 'k',
        }
    }
}

/// Snapshot of a component's six style attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    pub color: Option<ChatColor>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underlined: Option<bool>,
    pub strikethrough: Option<bool>,
    pub obfuscated: Option<bool>,
}

impl Style {
    /// A style with every attribute unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: None,
            bold: None,
            italic: None,
            underlined: None,
            strikethrough: None,
            obfuscated: None,
        }
    }

    #[must_use]
    pub const fn color(mut self, color: ChatColor) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self, on: bool) -> Self {
        self.bold = Some(on);
        self
    }

    #[must_use]
    pub const fn italic(mut self, on: bool) -> Self {
        self.italic = Some(on);
        self
    }

    #[must_use]
    pub const fn underlined(mut self, on: bool) -> Self {
        self.underlined = Some(on);
        self
    }

    #[must_use]
    pub const fn strikethrough(mut self, on: bool) -> Self {
        self.strikethrough = Some(on);
        self
    }

    #[must_use]
    pub const fn obfuscated(mut self, on: bool) -> Self {
        self.obfuscated = Some(on);
        self
    }

    /// Read a format attribute as stored (unset is `None`).
    #[must_use]
    pub const fn format(&self, format: Format) -> Option<bool> {
        match format {
            Format::Bold => self.bold,
            Format::Italic => self.italic,
            Format::Underlined => self.underlined,
            Format::Strikethrough => self.strikethrough,
            Format::Obfuscated => self.obfuscated,
        }
    }

    /// Set or clear a format attribute.
    pub fn set_format(&mut self, format: Format, value: Option<bool>) {
        let slot = match format {
            Format::Bold => &mut self.bold,
            Format::Italic => &mut self.italic,
            Format::Underlined => &mut self.underlined,
            Format::Strikethrough => &mut self.strikethrough,
            Format::Obfuscated => &mut self.obfuscated,
        };
        *slot = value;
    }

    /// Fill every unset attribute from `parent`.
    #[must_use]
    pub fn inherit(self, parent: &Style) -> Self {
        Self {
            color: self.color.or(parent.color),
            bold: self.bold.or(parent.bold),
            italic: self.italic.or(parent.italic),
            underlined: self.underlined.or(parent.underlined),
            strikethrough: self.strikethrough.or(parent.strikethrough),
            obfuscated: self.obfuscated.or(parent.obfuscated),
        }
    }

    /// Whether every attribute is resolved, so walking further up is useless.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.color.is_some()
            && self.bold.is_some()
            && self.italic.is_some()
            && self.underlined.is_some()
            && self.strikethrough.is_some()
            && self.obfuscated.is_some()
    }

    /// Whether no attribute is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underlined.is_none()
            && self.strikethrough.is_none()
            && self.obfuscated.is_none()
    }

    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }

    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.italic.unwrap_or(false)
    }

    #[must_use]
    pub fn is_underlined(&self) -> bool {
        self.underlined.unwrap_or(false)
    }

    #[must_use]
    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough.unwrap_or(false)
    }

    #[must_use]
    pub fn is_obfuscated(&self) -> bool {
        self.obfuscated.unwrap_or(false)
    }

    /// Append the legacy markers for this style to `out`.
    ///
    /// Color first (only when present), then each enabled format in
    /// [`Format::ORDER`]. Unset flags count as disabled.
    pub fn write_legacy(&self, out: &mut String) {
        if let Some(color) = self.color {
            color.write_marker(out);
        }
        for format in Format::ORDER {
            if self.format(format).unwrap_or(false) {
                out.push(SECTION_SIGN);
                out.push(format.code());
            }
        }
    }

    /// The legacy markers for this style as a new string.
    #[must_use]
    pub fn legacy_codes(&self) -> String {
        let mut out = String::new();
        self.write_legacy(&mut out);
        out
    }
}
