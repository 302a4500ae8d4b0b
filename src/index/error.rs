//! Search index error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by search index queries.
///
/// Every variant is distinct from an empty hit list: callers must be able
/// to tell "the index is down" from "no match exists".
pub enum IndexError {
    /// The query did not complete within the configured timeout.
    #[error("search against '{index}' timed out after {timeout_ms} ms")]
    Timeout {
        /// Index name.
        index: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The index endpoint could not be reached.
    #[error("search index unavailable at '{url}': {message}")]
    Unavailable {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The index answered with a non-success status.
    #[error("search against '{index}' failed with status {status}")]
    Http {
        /// Index name.
        index: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body did not parse.
    #[error("malformed response from '{index}': {message}")]
    Malformed {
        /// Index name.
        index: String,
        /// Error message.
        message: String,
    },
}
