//! Bibmatch library crate (used by the binary and integration tests).
//!
//! Resolves whether two partially-specified bibliographic records denote the
//! same real-world entity. Match methods return candidates, verify methods
//! return a discrete status: candidate generation queries the external
//! search index and is expensive, verification only consults the frozen
//! serials table and is fast.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`ContainerRecord`], [`ReleaseRecord`], [`ReleaseExtIds`] - Sparse records
//! - [`MatchStatus`] - Discrete match verdicts
//!
//! ## Retrieval
//! - [`CandidateRetriever`], [`RetrieverConfig`] - Tiered fallback search
//! - [`SearchIndex`], [`HttpSearchIndex`] - The search-index boundary
//! - [`Materializer`], [`SourceMaterializer`] - The hit-to-record boundary
//!
//! ## Verification
//! - [`verify_serial_name`] - Name-level serial verification
//! - [`SerialNameIndex`] - Frozen name → identifier table
//!
//! ## Caching
//! - [`ContentCache`], [`Resolved`] - Content-addressed artifact store
//! - [`LineDerivation`], [`TitleProjection`] - Streaming derivations
//! - Hashing functions for artifact fingerprints
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod derivation;
pub mod entity;
pub mod hashing;
pub mod index;
pub mod materialize;
pub mod retrieve;
pub mod serials;
pub mod verify;

pub use cache::{CacheError, ContentCache, Resolved};
pub use config::{Config, ConfigError};
pub use constants::{CONTAINER_INDEX, RELEASE_INDEX, UNBOUNDED_RESULT_SIZE};
pub use derivation::{DeriveError, DeriveStats, LineDerivation, TitleProjection};
pub use entity::{ContainerRecord, EXT_ID_FIELDS, ExtIdScheme, ReleaseExtIds, ReleaseRecord};
pub use hashing::{fingerprint_artifact, fingerprint_hex};
#[cfg(any(test, feature = "mock"))]
pub use index::{MockFailure, MockSearchIndex};
pub use index::{Fuzziness, HttpSearchIndex, IndexError, RawHit, SearchIndex};
pub use materialize::{MaterializeError, Materializer, SourceMaterializer};
pub use retrieve::{CandidateRetriever, RetrieveError, RetrieverConfig};
pub use serials::{SerialNameIndex, SerialsError};
pub use verify::{
    MatchStatus, VerifyError, verify_container_name, verify_container_record,
    verify_release_record, verify_serial_name,
};
