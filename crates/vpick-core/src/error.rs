//! Error handling for vpick
//!
//! Provides error types for the layers of the picker:
//! - Layout errors (parsing/serializing control records)
//! - Template errors (the on-disk template library)
//!
//! All error types use `thiserror`. A queried host node that does not exist
//! is not an error anywhere in vpick; the owning control is disabled instead.

use thiserror::Error;

/// Layout error type
///
/// Represents failures while reading a serialized control record or a batch
/// layout document. Any of these aborts the load of the whole document.
#[derive(Error, Debug, Clone)]
pub enum LayoutError {
    /// A numeric attribute did not parse
    #[error("Malformed value for '{attribute}' on <{element}>: '{value}'")]
    MalformedNumber {
        /// The element carrying the attribute.
        element: String,
        /// The attribute name.
        attribute: String,
        /// The raw attribute text.
        value: String,
    },

    /// The vertex list did not parse or does not match the control kind
    #[error("Malformed vertex list: {reason}")]
    MalformedPoints {
        /// Why the vertex list was rejected.
        reason: String,
    },

    /// Unknown control kind token
    #[error("Unknown control kind: '{kind}'")]
    UnknownKind {
        /// The unrecognized kind token.
        kind: String,
    },

    /// The document is not shaped like a layout
    #[error("Malformed document: {reason}")]
    MalformedDocument {
        /// Why the document was rejected.
        reason: String,
    },

    /// Low-level XML syntax error
    #[error("XML syntax error: {reason}")]
    Syntax {
        /// The underlying parser message.
        reason: String,
    },
}

/// Template error type
///
/// Represents failures of the file-backed template library. Filesystem
/// failures leave the prior on-disk state intact.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    /// The requested template file does not exist
    #[error("Template not found: {path}")]
    NotFound {
        /// The path that was requested.
        path: String,
    },

    /// The template directory cannot be enumerated
    #[error("Template directory not readable: {path}")]
    DirectoryNotReadable {
        /// The directory that was requested.
        path: String,
    },
}

/// Main error type for vpick
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Layout parse/serialize error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Template library error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config {
        /// What went wrong while loading or saving configuration.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parse error (bad record or document)
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this is a missing-file error
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Template(TemplateError::NotFound { .. }) => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
