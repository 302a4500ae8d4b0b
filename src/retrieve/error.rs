//! Retrieval error types.

use thiserror::Error;

use crate::index::IndexError;
use crate::materialize::MaterializeError;

#[derive(Debug, Error)]
/// Errors that abort a retrieval.
///
/// An empty candidate set is not an error; a failed tier is, and it is
/// never degraded into "no hit".
pub enum RetrieveError {
    /// A search tier failed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Materialization of a non-empty tier result failed.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}
