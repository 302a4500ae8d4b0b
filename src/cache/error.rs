//! Cache error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::derivation::DeriveError;

#[derive(Debug, Error)]
/// Errors returned by the content-addressed cache.
///
/// Any failure after the temporary file was written leaves no artifact at
/// the canonical path; a retried call redoes the full derivation.
pub enum CacheError {
    /// The cache root directory could not be created.
    #[error("failed to create cache root '{path}': {source}")]
    RootCreationFailed {
        /// Cache root directory.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A private temporary file could not be created in the cache root.
    #[error("failed to create temporary artifact under '{path}': {source}")]
    TempFileFailed {
        /// Cache root directory.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Flushing the temporary artifact to disk failed.
    #[error("failed to flush temporary artifact: {source}")]
    TempWriteFailed {
        #[source]
        source: std::io::Error,
    },

    /// The shard directory could not be created.
    #[error("failed to create shard directory '{path}': {source}")]
    ShardCreationFailed {
        /// Shard directory.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic publication (rename to the canonical path) failed.
    #[error("failed to publish artifact to '{path}': {source}")]
    PublishFailed {
        /// Canonical artifact path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The derivation itself failed.
    #[error(transparent)]
    Derive(#[from] DeriveError),
}
