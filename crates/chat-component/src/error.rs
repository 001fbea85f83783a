use std::path::PathBuf;

use chat_i18n::I18nError;
use thiserror::Error;

use crate::tree::NodeId;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors from building or rendering a component tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The template asked for an argument the node does not have.
    ///
    /// `index` is the 1-based argument position requested (explicit `%n$s`
    /// or the sequential position); `len` is the number of arguments.
    #[error("translation '{key}' references argument {index} but only {len} supplied")]
    ArgumentIndexOutOfRange { key: String, index: usize, len: usize },

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("node {0} is not a translatable component")]
    NotTranslatable(NodeId),

    #[error("attaching {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("node {0} appears more than once in the same child list")]
    DuplicateChild(NodeId),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dictionary error: {0}")]
    I18n(#[from] I18nError),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
