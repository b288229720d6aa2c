//! Errors reported by the search orchestrators.

use thiserror::Error;

use super::ports::TransportError;

/// Why a search or answers fetch produced no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The transport failed before a response arrived.
    #[error("request failed: {message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
    /// The API answered with a non-success status.
    #[error("api returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Compact preview of the response body.
        message: String,
    },
    /// The response body was not valid JSON.
    #[error("invalid api JSON payload: {message}")]
    Decode {
        /// Parser error description.
        message: String,
    },
    /// The payload had no usable top-level `items` array.
    #[error("api payload has no usable `items` array")]
    MissingItems,
    /// The question has no identifier to fetch answers for.
    #[error("question has no post identifier")]
    MissingPostId,
}

impl From<TransportError> for SearchError {
    fn from(error: TransportError) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }
}
