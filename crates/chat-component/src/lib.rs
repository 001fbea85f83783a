#![forbid(unsafe_code)]

//! Translatable chat components.
//!
//! A chat component is a node in a tree of formatted text. Text nodes hold
//! their content directly; translatable nodes hold a key into a locale
//! dictionary plus argument nodes that fill the template's `%s` / `%n$s`
//! placeholders. Every node carries optional style attributes inherited by
//! its children and may have trailing "extra" children.
//!
//! # Role in the workspace
//! `chat-component` composes `chat-style` (style attributes and legacy
//! markers) and `chat-i18n` (dictionaries and template scanning) into the
//! component tree and its two renderings: plain text and legacy text with
//! section-sign markers.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use chat_component::{Argument, ComponentTree};
//! use chat_style::{ChatColor, Style};
//!
//! let mut dictionary = HashMap::new();
//! dictionary.insert("chat.type.text".to_string(), "<%s> %s".to_string());
//!
//! let mut tree = ComponentTree::new(Arc::new(dictionary));
//! let name = tree.text("Alex");
//! tree.set_style(name, Style::new().color(ChatColor::Gold)).unwrap();
//! let message = tree.translatable("chat.type.text", [Argument::from(name), "hi".into()]).unwrap();
//!
//! assert_eq!(tree.to_plain_text(message).unwrap(), "<Alex> hi");
//! assert_eq!(tree.to_legacy_text(message).unwrap(), "<\u{a7}6Alex> hi");
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod tree;

pub use config::{ChatConfig, DictionarySource, LegacyConfig};
pub use error::{ChatError, ConfigError, Result};
pub use render::{ArgumentResolver, RenderMode};
pub use tree::{Argument, Children, ComponentTree, Node, NodeId, NodeKind};
