//! Locale dictionaries and a multi-locale catalog with fallback.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: every lookup tries the requested locale
//!    and then walks the chain exactly once, returning `None` if no locale
//!    provides the key.
//!
//! 2. **Immutable after load**: dictionaries are plain data; once shared
//!    behind an `Arc` they are read-only and `Send + Sync`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in any locale | Returns `None` |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Empty catalog | No locales loaded | All lookups return `None` |
//! | Bad language file | Parse error | `I18nError` from the loader |

use std::collections::HashMap;
use std::path::Path;

use crate::error::{I18nError, Result};
use crate::properties::parse_properties;

/// Locale identifier (e.g., `"en_US"`, `"de_DE"`).
pub type Locale = String;

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Read-only mapping from translation key to template string.
///
/// Implementations must be cheap to query; renderers call `lookup` once per
/// translatable node per render.
pub trait LocaleDictionary: Send + Sync {
    /// The template for `key`, or `None` when the key is unknown.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl LocaleDictionary for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Templates for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleStrings {
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    /// Create an empty locale string set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template, replacing any previous one for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Look up a template by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Whether `key` has a template.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Iterate over all keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the locale has no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Parse a `.properties` language file.
    pub fn from_properties_str(input: &str) -> Result<Self> {
        let strings: HashMap<String, String> = parse_properties(input)?.into_iter().collect();
        Ok(Self { strings })
    }

    /// Parse a flat JSON object of `"key": "template"` entries.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(input)?;
        let mut strings = HashMap::with_capacity(object.len());
        for (key, value) in object {
            match value {
                serde_json::Value::String(template) => {
                    strings.insert(key, template);
                }
                _ => return Err(I18nError::NonStringEntry { key }),
            }
        }
        Ok(Self { strings })
    }

    /// Load a language file, choosing the reader by extension
    /// (`.json`, or `.properties` / `.lang`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let loader: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("properties" | "lang") => Self::from_properties_str,
            _ => {
                return Err(I18nError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let content = std::fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let strings = loader(&content)?;
        tracing::debug!(
            path = %path.display(),
            entries = strings.len(),
            "Loaded language file"
        );
        Ok(strings)
    }
}

impl LocaleDictionary for LocaleStrings {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl FromIterator<(String, String)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}

/// Templates for several locales with a baseline locale and fallback chain.
///
/// As a [`LocaleDictionary`], the catalog answers for its baseline locale.
///
/// # Example
///
/// ```
/// use chat_i18n::catalog::{LocaleDictionary, LocaleStrings, StringCatalog};
///
/// let mut en = LocaleStrings::new();
/// en.insert("chat.type.text", "<%s> %s");
/// en.insert("multiplayer.player.joined", "%s joined the game");
///
/// let mut de = LocaleStrings::new();
/// de.insert("multiplayer.player.joined", "%s hat das Spiel betreten");
///
/// let mut catalog = StringCatalog::new();
/// catalog.add_locale("en_US", en);
/// catalog.add_locale("de_DE", de);
/// catalog.set_fallback_chain(vec!["en_US".into()]);
/// catalog.set_baseline("de_DE");
///
/// assert_eq!(catalog.lookup("multiplayer.player.joined"), Some("%s hat das Spiel betreten"));
/// assert_eq!(catalog.lookup("chat.type.text"), Some("<%s> %s"));
/// assert_eq!(catalog.lookup("missing"), None);
/// ```
#[derive(Debug, Clone)]
pub struct StringCatalog {
    locales: HashMap<Locale, LocaleStrings>,
    fallback_chain: Vec<Locale>,
    baseline: Locale,
}

impl Default for StringCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StringCatalog {
    /// Create an empty catalog with [`DEFAULT_LOCALE`] as baseline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locales: HashMap::new(),
            fallback_chain: Vec::new(),
            baseline: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Add (or replace) strings for a locale.
    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Set the fallback chain (tried in order when a key is missing).
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain;
    }

    /// Set the locale used for [`LocaleDictionary::lookup`].
    pub fn set_baseline(&mut self, locale: impl Into<String>) {
        self.baseline = locale.into();
    }

    /// The locale used for [`LocaleDictionary::lookup`].
    #[must_use]
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Strings for exactly one locale, without fallback.
    #[must_use]
    pub fn locale(&self, locale: &str) -> Option<&LocaleStrings> {
        self.locales.get(locale)
    }

    /// Look up a template by key.
    ///
    /// Tries the specified locale first, then walks the fallback chain.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        if let Some(template) = self.locales.get(locale).and_then(|ls| ls.get(key)) {
            return Some(template);
        }

        self.fallback_chain
            .iter()
            .filter(|fallback| fallback.as_str() != locale)
            .find_map(|fallback| {
                self.locales
                    .get(fallback.as_str())
                    .and_then(|ls| ls.get(key))
            })
    }

    /// Keys present in the baseline locale but absent from `locale`, sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: &str) -> Vec<&str> {
        let Some(baseline) = self.locales.get(&self.baseline) else {
            return Vec::new();
        };
        let target = self.locales.get(locale);
        let mut missing: Vec<&str> = baseline
            .keys()
            .filter(|key| !target.is_some_and(|ls| ls.contains(key)))
            .collect();
        missing.sort_unstable();
        missing
    }

    /// All registered locale tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl LocaleDictionary for StringCatalog {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(&self.baseline, key)
    }
}
