use serde::Deserialize;
use serde_json::Value;

/// Fuzziness mode for full-text match queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fuzziness {
    /// Terms must match exactly.
    None,
    /// Edit-distance tolerance, automatically scaled to term length.
    Auto,
}

/// One raw hit from the search index.
///
/// Carries the stored document body untyped; the materialization boundary
/// turns it into a typed record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    /// Document id.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Stored document body.
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl RawHit {
    /// Builds a hit from an id and a source document.
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

/// Wire shape of a search response (only the subset this crate reads).
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}
