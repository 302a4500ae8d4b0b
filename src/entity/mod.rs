//! Sparse bibliographic records.
//!
//! Any field may be absent. An absent field is never treated as a wildcard:
//! retrieval skips the corresponding tier and verification refuses to ground
//! a verdict on it.

use serde::{Deserialize, Serialize};

/// A publication venue (journal, conference proceedings), possibly partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerRecord {
    /// Canonical record identifier, if known.
    pub ident: Option<String>,
    /// Venue name.
    pub name: Option<String>,
    /// Linking ISSN unifying print/electronic ISSNs.
    pub issnl: Option<String>,
    /// External knowledge-base identifier.
    pub wikidata_qid: Option<String>,
}

/// A specific instance of a scholarly work (article, preprint), possibly partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseRecord {
    /// Canonical record identifier, if known.
    pub ident: Option<String>,
    /// Work title.
    pub title: Option<String>,
    /// External identifiers attached to this release.
    pub ext_ids: ReleaseExtIds,
}

/// External identifiers attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseExtIds {
    pub doi: Option<String>,
    pub wikidata_qid: Option<String>,
    pub isbn13: Option<String>,
    pub pmid: Option<String>,
    pub pmcid: Option<String>,
    pub core: Option<String>,
    pub arxiv: Option<String>,
    pub jstor: Option<String>,
    pub ark: Option<String>,
    pub mag: Option<String>,
}

impl ReleaseExtIds {
    /// Value for `scheme`, if present and non-empty.
    pub fn get(&self, scheme: ExtIdScheme) -> Option<&str> {
        let value = match scheme {
            ExtIdScheme::Doi => &self.doi,
            ExtIdScheme::WikidataQid => &self.wikidata_qid,
            ExtIdScheme::Isbn13 => &self.isbn13,
            ExtIdScheme::Pmid => &self.pmid,
            ExtIdScheme::Pmcid => &self.pmcid,
            ExtIdScheme::Core => &self.core,
            ExtIdScheme::Arxiv => &self.arxiv,
            ExtIdScheme::Jstor => &self.jstor,
            ExtIdScheme::Ark => &self.ark,
            ExtIdScheme::Mag => &self.mag,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

/// External identifier schemes, in retrieval priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtIdScheme {
    Doi,
    WikidataQid,
    Isbn13,
    Pmid,
    Pmcid,
    Core,
    Arxiv,
    Jstor,
    Ark,
    Mag,
}

impl ExtIdScheme {
    /// Stable scheme label, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtIdScheme::Doi => "doi",
            ExtIdScheme::WikidataQid => "wikidata_qid",
            ExtIdScheme::Isbn13 => "isbn13",
            ExtIdScheme::Pmid => "pmid",
            ExtIdScheme::Pmcid => "pmcid",
            ExtIdScheme::Core => "core",
            ExtIdScheme::Arxiv => "arxiv",
            ExtIdScheme::Jstor => "jstor",
            ExtIdScheme::Ark => "ark",
            ExtIdScheme::Mag => "mag",
        }
    }
}

impl std::fmt::Display for ExtIdScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release retrieval scans these schemes strictly in order, pairing each with
/// the index field it queries. An explicit table, so the priority order is a
/// reviewable constant rather than map iteration order.
pub const EXT_ID_FIELDS: [(ExtIdScheme, &str); 10] = [
    (ExtIdScheme::Doi, "doi"),
    (ExtIdScheme::WikidataQid, "wikidata_qid"),
    (ExtIdScheme::Isbn13, "isbn13"),
    (ExtIdScheme::Pmid, "pmid"),
    (ExtIdScheme::Pmcid, "pmcid"),
    (ExtIdScheme::Core, "code_id"),
    (ExtIdScheme::Arxiv, "arxiv_id"),
    (ExtIdScheme::Jstor, "jstor_id"),
    (ExtIdScheme::Ark, "ark_id"),
    (ExtIdScheme::Mag, "mag_id"),
];
