//! Shared fixtures for integration tests.

use bibmatch::entity::ContainerRecord;
use bibmatch::index::RawHit;
use bibmatch::serials::SerialNameIndex;
use serde_json::json;

/// A container hit as the search index would return it.
pub fn container_hit(ident: &str, name: &str) -> RawHit {
    RawHit::new(ident, json!({"ident": ident, "name": name}))
}

/// A partial container record with only the given fields set.
pub fn partial_container(name: Option<&str>, issnl: Option<&str>) -> ContainerRecord {
    ContainerRecord {
        name: name.map(str::to_string),
        issnl: issnl.map(str::to_string),
        ..Default::default()
    }
}

/// A serials table from literal `(name, identifier)` pairs.
pub fn serials_index(pairs: &[(&str, &str)]) -> SerialNameIndex {
    SerialNameIndex::from_entries(
        pairs
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string())),
    )
}
