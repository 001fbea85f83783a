use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, I18nError>;

/// Errors from loading language files.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON language file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON language file entry '{key}' is not a string")]
    NonStringEntry { key: String },

    #[error("properties error on line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("unsupported language file format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl I18nError {
    #[must_use]
    pub fn properties(line: usize, message: impl Into<String>) -> Self {
        Self::Properties {
            line,
            message: message.into(),
        }
    }
}
