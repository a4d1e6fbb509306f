//! Error types for the flyer feed loader.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a product feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP-level error with status code.
    #[error("HTTP error {status}: {message}")]
    Http {
        /// The HTTP status code returned by the server.
        status: u16,
        /// The response body, if any.
        message: String,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },

    /// I/O error while reading a feed file or directory.
    #[error("failed to read feed '{path}': {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The feed body is not well-formed JSON.
    #[error("malformed feed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The feed parsed but its root is not a JSON array.
    #[error("feed root is not a JSON array")]
    NotAnArray,
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

impl FeedError {
    /// Returns true if the feed could not be retrieved at all.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            FeedError::Http { .. } | FeedError::Network { .. } | FeedError::Read { .. }
        )
    }

    /// Returns true if the feed was retrieved but could not be interpreted.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, FeedError::Parse(_) | FeedError::NotAnArray)
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FeedError::Http { .. } | FeedError::Network { .. } => 2,
            FeedError::Read { .. } => 3,
            FeedError::Parse(_) | FeedError::NotAnArray => 1,
        }
    }
}
