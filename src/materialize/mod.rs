//! Record-materialization boundary.
//!
//! Turns raw index hits into full typed records. The retriever treats this
//! as a pure, side-effect-free function and calls it once per non-empty
//! tier result.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::entity::{ContainerRecord, ReleaseRecord};
use crate::index::RawHit;

#[derive(Debug, Error)]
/// Errors while materializing records from raw hits.
pub enum MaterializeError {
    /// A hit's stored document did not decode into the requested record type.
    #[error("failed to decode hit '{id}': {message}")]
    Decode {
        /// Document id of the offending hit.
        id: String,
        /// Decode error message.
        message: String,
    },
}

/// Converts raw index hits into typed records.
pub trait Materializer: Send + Sync {
    /// Materializes container records.
    fn containers(&self, hits: Vec<RawHit>) -> Result<Vec<ContainerRecord>, MaterializeError>;

    /// Materializes release records.
    fn releases(&self, hits: Vec<RawHit>) -> Result<Vec<ReleaseRecord>, MaterializeError>;
}

/// Materializes records straight from each hit's stored `_source` document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceMaterializer;

impl SourceMaterializer {
    fn decode<T: DeserializeOwned>(hits: Vec<RawHit>) -> Result<Vec<T>, MaterializeError> {
        hits.into_iter()
            .map(|hit| {
                let RawHit { id, source } = hit;
                serde_json::from_value(source)
                    .map_err(|e| MaterializeError::Decode {
                        id,
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

impl Materializer for SourceMaterializer {
    fn containers(&self, hits: Vec<RawHit>) -> Result<Vec<ContainerRecord>, MaterializeError> {
        Self::decode(hits)
    }

    fn releases(&self, hits: Vec<RawHit>) -> Result<Vec<ReleaseRecord>, MaterializeError> {
        Self::decode(hits)
    }
}
