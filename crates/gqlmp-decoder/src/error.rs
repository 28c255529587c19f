//! Error types for the multipart decoder
//!
//! Only a handful of conditions are fatal:
//! - a JSON part that does not decode into the requested shape
//! - a file-bearing `operations`/`map` part whose content cannot be read
//! - a missing `operations` part when it is configured as required
//! - a request field of the wrong shape under strict building
//!
//! Invalid paths, unmatched file keys and unresolvable traversal steps are
//! absorbed by the pipeline and at most logged.

use gqlmp_graph::FieldShapeMismatch;

/// Decode pipeline error
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A JSON part did not decode into the requested shape
    #[error("malformed '{part}' part: {source}")]
    MalformedPart {
        /// Wire name of the part
        part: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Reading a file-bearing part's content failed
    #[error("failed to read '{part}' part: {source}")]
    PartRead {
        /// Wire name of the part
        part: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A required part was not submitted
    #[error("missing required '{0}' part")]
    MissingPart(String),

    /// A request field had the wrong shape (strict building only)
    #[error("invalid request field: {0}")]
    FieldShape(#[from] FieldShapeMismatch),
}

impl DecodeError {
    /// Wire name of the part this error concerns, if any
    #[must_use]
    pub fn part(&self) -> Option<&str> {
        match self {
            Self::MalformedPart { part, .. } | Self::PartRead { part, .. } => Some(part),
            Self::MissingPart(part) => Some(part),
            Self::FieldShape(_) => None,
        }
    }
}

/// Upload scalar coercion error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// The runtime value is not a bound upload
    #[error("expected an Upload, found {found}")]
    NotAnUpload {
        /// Shape of the value actually supplied
        found: &'static str,
    },

    /// Uploads cannot be written inline in a query document
    #[error("Upload cannot be written as a literal")]
    LiteralUnsupported,

    /// Uploads are input-only
    #[error("Upload cannot be serialized")]
    SerializeUnsupported,
}

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a configuration
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The variables root must be one non-empty path segment
    #[error("invalid variables root {0:?}")]
    InvalidRoot(String),
}

/// Result type for decode operations
pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
