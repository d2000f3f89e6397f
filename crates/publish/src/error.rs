//! Error types for publishing provider trees and loading them from JSON.

use thiserror::Error;

/// Errors raised while publishing a provider tree or loading one.
///
/// Every error is terminal: a failed publish leaves the sink with output that
/// must be treated as unusable.
#[derive(Error, Debug)]
pub enum PublishError {
    /// A tree node is neither a leaf nor a compound provider.
    #[error("do not know how to handle a {type_name} data provider")]
    UnsupportedProviderType { type_name: String },

    /// An image payload could not be fully read.
    #[error("failed to read image '{key}': {source}")]
    ImageRead {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A key is not usable as an XML element name.
    #[error("key '{key}' is not a valid XML element name")]
    InvalidElementName { key: String },

    /// A value contains a character XML 1.0 does not allow.
    #[error("value of '{key}' contains {character:?}, which XML does not allow")]
    InvalidCharacter { key: String, character: char },

    /// The XML writer rejected an event.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Writing to or flushing the sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON input could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON input parsed but does not describe a provider tree.
    #[error("invalid provider description at '{key}': {reason}")]
    InvalidDescription { key: String, reason: String },
}

impl PublishError {
    pub(crate) fn invalid_description(key: impl Into<String>, reason: impl Into<String>) -> Self {
        PublishError::InvalidDescription {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
