//! Diagnostics raised while harvesting document metadata.
//!
//! Syntax problems never fail a parse; they degrade to literal text. The only
//! reportable condition is a metadata value that cannot be interpreted, which
//! is collected on the [`Document`](crate::Document) and the entry is dropped.

use thiserror::Error;

/// A metadata value that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// A key expecting `true`/`false` got something else.
    #[error("metadata `{key}`: expected true or false, found `{value}`")]
    InvalidBoolean { key: String, value: String },

    /// A date key whose value is not a `YYYY-MM-DD` calendar date.
    #[error("metadata `{key}`: `{value}` is not a valid YYYY-MM-DD date")]
    InvalidDate { key: String, value: String },
}

/// Result alias for metadata value parsing.
pub type Result<T> = std::result::Result<T, MetadataError>;

impl MetadataError {
    pub fn invalid_boolean(key: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataError::InvalidBoolean {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn invalid_date(key: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataError::InvalidDate {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The metadata key the error refers to.
    pub fn key(&self) -> &str {
        match self {
            MetadataError::InvalidBoolean { key, .. } | MetadataError::InvalidDate { key, .. } => key,
        }
    }
}
