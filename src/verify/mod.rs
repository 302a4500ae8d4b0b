//! Match verification: discrete confidence verdicts.
//!
//! Candidate retrieval talks to the network and is expensive; verification
//! only consults the frozen serials table and is fast.

pub mod error;


pub use error::VerifyError;

use crate::entity::{ContainerRecord, ReleaseRecord};
use crate::serials::SerialNameIndex;

/// Discrete match verdict.
///
/// These are qualitatively distinct outcomes, not points on a confidence
/// scale; in particular [`Ambiguous`](MatchStatus::Ambiguous) must never be
/// collapsed into [`Different`](MatchStatus::Different).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// Both inputs denote the same entity, with no remaining doubt.
    Exact,
    /// High-confidence identity, short of certain.
    Strong,
    /// The evidence cannot discriminate.
    Ambiguous,
    /// Explicit negative: the inputs denote different entities.
    Different,
}

impl MatchStatus {
    /// Stable verdict label.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Exact => "exact",
            MatchStatus::Strong => "strong",
            MatchStatus::Ambiguous => "ambiguous",
            MatchStatus::Different => "different",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-level serial verification.
///
/// Ambiguity is checked before exactness and exactness before overlap, so a
/// name that resolves to multiple identifiers is never reported as matching
/// anything, including itself.
pub fn verify_serial_name(index: &SerialNameIndex, a: &str, b: &str) -> MatchStatus {
    let sa = index.lookup(a);
    let sb = index.lookup(b);

    // A name resolving to several identifiers cannot ground a decision.
    if sa.len() > 1 || sb.len() > 1 {
        return MatchStatus::Ambiguous;
    }

    if sa.len() == 1 && sb.len() == 1 {
        return if sa == sb {
            MatchStatus::Exact
        } else {
            MatchStatus::Different
        };
    }

    // At least one side is unresolved; overlap is the only signal left.
    if sa.intersection(sb).next().is_some() {
        return MatchStatus::Strong;
    }

    MatchStatus::Ambiguous
}

/// Container-name verification.
///
/// Container names are a superset of serial names; no decision procedure is
/// defined for the general case yet.
pub fn verify_container_name(_a: &str, _b: &str) -> Result<MatchStatus, VerifyError> {
    Err(VerifyError::Unimplemented {
        entry_point: "verify_container_name",
    })
}

/// Record-level container verification.
pub fn verify_container_record(
    _a: &ContainerRecord,
    _b: &ContainerRecord,
) -> Result<MatchStatus, VerifyError> {
    Err(VerifyError::Unimplemented {
        entry_point: "verify_container_record",
    })
}

/// Record-level release verification.
pub fn verify_release_record(
    _a: &ReleaseRecord,
    _b: &ReleaseRecord,
) -> Result<MatchStatus, VerifyError> {
    Err(VerifyError::Unimplemented {
        entry_point: "verify_release_record",
    })
}
