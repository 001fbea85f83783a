#![forbid(unsafe_code)]

//! File-based configuration for component trees.
//!
//! Captures the locale setup and legacy rendering options as a single
//! [`ChatConfig`] loaded from TOML or JSON at startup.
//!
//! ```toml
//! # chat.toml
//! locale = "en_US"
//! fallback_chain = ["en_US"]
//!
//! [[dictionaries]]
//! locale = "en_US"
//! path = "lang/en_US.properties"
//!
//! [legacy]
//! root_color = "white"
//! ```
//!
//! ```rust,ignore
//! let config = ChatConfig::from_toml_file("chat.toml")?;
//! let tree = ComponentTree::from_config(&config)?;
//! ```
//!
//! # Defaults
//!
//! Every field has a default, so an empty file is valid: locale `en_US`, no
//! fallback chain, no dictionaries (every key renders as itself), and no
//! root color.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chat_i18n::{DEFAULT_LOCALE, LocaleStrings, StringCatalog};
use chat_style::ChatColor;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tree::ComponentTree;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Baseline locale used for every lookup.
    pub locale: String,

    /// Locales tried in order when the baseline lacks a key.
    pub fallback_chain: Vec<String>,

    /// Language files to load.
    pub dictionaries: Vec<DictionarySource>,

    /// Legacy rendering options.
    pub legacy: LegacyConfig,

    /// Directory relative dictionary paths resolve against. Set when the
    /// configuration is read from a file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            fallback_chain: Vec::new(),
            dictionaries: Vec::new(),
            legacy: LegacyConfig::default(),
            base_dir: None,
        }
    }
}

/// One language file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySource {
    pub locale: String,
    /// `.properties`, `.lang`, or `.json` file.
    pub path: PathBuf,
}

/// Options for legacy rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    /// Color assumed at the root when no component sets one. Unset means
    /// no color marker is written for uncolored text, and legacy clients
    /// carry an argument's styling into the text that follows it. Set
    /// `root_color = "white"` for chat output.
    pub root_color: Option<ChatColor>,
}

impl ChatConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk. Relative dictionary paths resolve
    /// against the file's directory.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check for problems. Returns an empty list when the configuration is
    /// usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.locale.trim().is_empty() {
            errors.push("locale must not be empty".into());
        }

        if self.fallback_chain.iter().any(|l| l.trim().is_empty()) {
            errors.push("fallback_chain entries must not be empty".into());
        }

        let mut seen = HashSet::new();
        for (i, source) in self.dictionaries.iter().enumerate() {
            if source.locale.trim().is_empty() {
                errors.push(format!("dictionaries[{i}].locale must not be empty"));
            } else if !seen.insert(source.locale.as_str()) {
                errors.push(format!(
                    "dictionaries[{i}]: locale '{}' listed more than once",
                    source.locale
                ));
            }
            if source.path.as_os_str().is_empty() {
                errors.push(format!("dictionaries[{i}].path must not be empty"));
            }
        }

        errors
    }

    /// Where a dictionary file actually lives.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Validate and load every configured language file into a catalog.
    pub fn load_catalog(&self) -> Result<StringCatalog, ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let mut catalog = StringCatalog::new();
        for source in &self.dictionaries {
            let strings = LocaleStrings::from_path(self.resolve_path(&source.path))?;
            catalog.add_locale(source.locale.clone(), strings);
        }
        catalog.set_fallback_chain(self.fallback_chain.clone());
        catalog.set_baseline(self.locale.clone());
        tracing::debug!(
            locale = %self.locale,
            locales = self.dictionaries.len(),
            "Built string catalog from configuration"
        );
        Ok(catalog)
    }
}

impl ComponentTree {
    /// Build an empty tree from a configuration, loading its dictionaries.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ConfigError> {
        let catalog = config.load_catalog()?;
        Ok(Self::new(Arc::new(catalog)).with_root_color(config.legacy.root_color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ChatConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.locale, "en_US");
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ChatConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn toml_full() {
        let config = ChatConfig::from_toml_str(
            r#"
locale = "de_DE"
fallback_chain = ["en_US"]

[[dictionaries]]
locale = "de_DE"
path = "lang/de_DE.properties"

[[dictionaries]]
locale = "en_US"
path = "lang/en_us.json"

[legacy]
root_color = "white"
"#,
        )
        .unwrap();
        assert_eq!(config.locale, "de_DE");
        assert_eq!(config.fallback_chain, vec!["en_US".to_string()]);
        assert_eq!(config.dictionaries.len(), 2);
        assert_eq!(config.legacy.root_color, Some(ChatColor::White));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn unknown_color_rejected() {
        let err = ChatConfig::from_toml_str("[legacy]\nroot_color = \"crimson\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn json_round_trip() {
        let mut config = ChatConfig::default();
        config.legacy.root_color = Some(ChatColor::DarkGray);
        let json = config.to_json().unwrap();
        assert!(json.contains("dark_gray"));
        assert_eq!(ChatConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = ChatConfig {
            locale: " ".into(),
            fallback_chain: vec![String::new()],
            dictionaries: vec![
                DictionarySource {
                    locale: "en_US".into(),
                    path: "a.json".into(),
                },
                DictionarySource {
                    locale: "en_US".into(),
                    path: PathBuf::new(),
                },
            ],
            ..ChatConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::Validation(list)) if list.len() == 4
        ));
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let config = ChatConfig {
            base_dir: Some(PathBuf::from("/etc/chat")),
            ..ChatConfig::default()
        };
        assert_eq!(
            config.resolve_path(Path::new("lang/en.json")),
            PathBuf::from("/etc/chat/lang/en.json")
        );
        assert_eq!(
            config.resolve_path(Path::new("/abs/en.json")),
            PathBuf::from("/abs/en.json")
        );
    }

    #[test]
    fn tree_from_default_config_renders_keys() {
        let mut tree = ComponentTree::from_config(&ChatConfig::default()).unwrap();
        let node = tree.translatable("gui.done", ["x"]).unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "gui.done");
        assert_eq!(tree.root_color(), None);
    }
}
