//! Frozen serial-name lookup table.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
/// Errors while loading the serials table.
pub enum SerialsError {
    /// The table artifact could not be opened.
    #[error("failed to open serials table '{path}': {source}")]
    Open {
        /// Artifact path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the table artifact failed.
    #[error("failed to read serials table '{path}': {source}")]
    Read {
        /// Artifact path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Normalized-name to canonical-identifier lookup table.
///
/// Built once (typically from a projection artifact over a serials metadata
/// dump) and frozen; verification only reads it. The empty set means
/// "unknown name" — distinct from a singleton ("resolves uniquely") and
/// from a larger set ("ambiguous name").
#[derive(Debug, Default)]
pub struct SerialNameIndex {
    names: HashMap<String, HashSet<String>>,
}

impl SerialNameIndex {
    /// Builds a table from `(name, identifier)` pairs, aggregating
    /// duplicate names into identifier sets.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut names: HashMap<String, HashSet<String>> = HashMap::new();
        for (name, identifier) in entries {
            names.entry(name).or_default().insert(identifier);
        }
        Self { names }
    }

    /// Loads a table from a projection artifact of
    /// `identifier<TAB>name` lines, inverting it to name → identifiers.
    ///
    /// Lines without a tab are skipped; a name listed under several
    /// identifiers becomes an ambiguous entry.
    pub fn load(path: &Path) -> Result<Self, SerialsError> {
        let file = File::open(path).map_err(|source| SerialsError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut names: HashMap<String, HashSet<String>> = HashMap::new();
        let mut malformed = 0u64;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| SerialsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            match line.split_once('\t') {
                Some((identifier, name)) if !identifier.is_empty() && !name.is_empty() => {
                    names
                        .entry(name.to_string())
                        .or_default()
                        .insert(identifier.to_string());
                }
                _ => malformed += 1,
            }
        }

        if malformed > 0 {
            debug!(malformed, "skipped malformed serials lines");
        }
        info!(names = names.len(), path = %path.display(), "serials table loaded");

        Ok(Self { names })
    }

    /// Identifier set for `name`; empty for unknown names.
    pub fn lookup(&self, name: &str) -> &HashSet<String> {
        static EMPTY: OnceLock<HashSet<String>> = OnceLock::new();
        self.names
            .get(name)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// Number of distinct names in the table.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the table holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
