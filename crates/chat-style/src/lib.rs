#![forbid(unsafe_code)]

//! Style types for chat components with parent-to-child inheritance.
//!
//! # Role in the workspace
//! `chat-style` is the shared vocabulary for colors, text formats, and the
//! legacy marker alphabet. The component tree stores a [`Style`] per node and
//! resolves effective styles through it; the renderer writes legacy markers
//! with [`Style::write_legacy`].
//!
//! # This crate provides
//! - [`ChatColor`] and the section-sign marker alphabet.
//! - [`Style`] with tri-state attributes and [`Style::inherit`].
//! - [`strip_codes`] for turning legacy text back into plain text.

/// Chat colors and marker alphabet.
pub mod color;
/// Style attributes with inheritance.
pub mod style;

pub use color::{ALL_CODES, ChatColor, SECTION_SIGN, UnknownColor, strip_codes};
pub use style::{Format, Style};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripping_effective_codes_leaves_text() {
        let style = Style::new().color(ChatColor::DarkRed).bold(true);
        let legacy = format!("{}warning", style.legacy_codes());
        assert_eq!(strip_codes(&legacy), "warning");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn style_deserializes_with_defaults() {
        let style: Style = serde_json::from_str(r#"{"color":"light_purple","bold":true}"#)
            .expect("valid style json");
        assert_eq!(style, Style::new().color(ChatColor::LightPurple).bold(true));
    }
}
