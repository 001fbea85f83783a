#![forbid(unsafe_code)]

//! Localization layer for chat components.
//!
//! Provides key-based template lookup with locale fallback, readers for
//! `.properties` and JSON language files, and the scanner for printf-style
//! translation templates.
//!
//! # Role in the workspace
//! `chat-i18n` isolates localization concerns: the component tree only sees
//! the [`LocaleDictionary`] capability and the [`format::parse`] segment
//! stream. It does not depend on styling or rendering, keeping the
//! localization layer reusable and testable.

pub mod catalog;
pub mod error;
pub mod format;
pub mod properties;

pub use catalog::{DEFAULT_LOCALE, Locale, LocaleDictionary, LocaleStrings, StringCatalog};
pub use error::I18nError;
pub use format::{FormatKind, Segment, Segments, parse};
