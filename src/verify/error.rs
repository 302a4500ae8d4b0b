//! Verification error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by verification entry points.
pub enum VerifyError {
    /// The entry point's decision procedure is not defined.
    ///
    /// Returned instead of a default verdict: a silently wrong status would
    /// be worse than a loud gap.
    #[error("verification entry point '{entry_point}' has no decision procedure")]
    Unimplemented {
        /// Name of the entry point that was called.
        entry_point: &'static str,
    },
}
