//! Error types for hoverscope.
//!
//! Only catalog loading can fail. Scanning, resolving, annotating and
//! rendering are total: a bad catalog degrades the table, it never reaches
//! the annotation pipeline as an error.

use hoverscope_core::Category;
use thiserror::Error;

/// Result type for hoverscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for hoverscope operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required catalog was absent when the table was merged.
    #[error("Missing catalog: {0}")]
    MissingCatalog(String),

    /// A catalog entry has no usable canonical name. Only that entry is skipped.
    #[error("Malformed {category} catalog entry '{id}': {reason}")]
    MalformedCatalog {
        /// Category of the catalog holding the entry.
        category: Category,
        /// Identifier of the offending entry.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog content has the wrong shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be read or is invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// A catalog source failed to produce catalogs.
    #[error("Source error: {0}")]
    Source(String),
}

impl Error {
    /// Create a missing catalog error.
    pub fn missing_catalog(what: impl Into<String>) -> Self {
        Error::MissingCatalog(what.into())
    }

    /// Create a malformed catalog entry error.
    pub fn malformed(category: Category, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedCatalog {
            category,
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a source error.
    pub fn source_failed(msg: impl Into<String>) -> Self {
        Error::Source(msg.into())
    }
}
