//! Derivation error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors that abort a derivation run.
///
/// Malformed individual lines are not errors; they are skipped and counted
/// in [`DeriveStats`](super::DeriveStats).
pub enum DeriveError {
    /// Reading the input stream failed.
    #[error("failed to read input line {line_no}: {source}")]
    Read {
        /// 1-based line number at which the read failed.
        line_no: u64,
        #[source]
        source: std::io::Error,
    },

    /// Writing a projected record failed.
    #[error("failed to write output record: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
}
