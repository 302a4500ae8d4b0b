//! Content-addressed cache for derivation artifacts.
//!
//! Artifacts are keyed by a fingerprint of `(logical key, derivation
//! identity)` and stored in a two-level sharded directory tree,
//! `{base}/{hex[0..2]}/{hex[2..]}`. Published entries are immutable; this
//! subsystem never deletes them.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::CacheError;

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::constants::SHARD_PREFIX_LEN;
use crate::derivation::{DeriveStats, LineDerivation};
use crate::hashing::fingerprint_hex;

/// Outcome of [`ContentCache::resolve_or_compute`].
#[derive(Debug)]
pub struct Resolved {
    /// Canonical artifact path.
    pub path: PathBuf,
    /// `true` if the artifact already existed and the derivation was skipped.
    pub hit: bool,
    /// Run counters; present only when the derivation actually ran.
    pub stats: Option<DeriveStats>,
}

/// Two-level sharded content-addressed store for derivation artifacts.
///
/// `resolve_or_compute` guarantees at most one derivation run per
/// fingerprint within a process: concurrent callers with the same
/// fingerprint serialize on a per-fingerprint lock and the losers observe
/// the winner's published artifact. Across processes the same race is
/// benign, since publication is a rename and derivations are idempotent.
#[derive(Debug, Clone)]
pub struct ContentCache {
    base: PathBuf,
    in_flight: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl ContentCache {
    /// Creates a cache rooted at `base` (not created until first use).
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the cache root directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Canonical path for a hex digest: `{base}/{hex[0..2]}/{hex[2..]}`.
    ///
    /// The split keeps any single directory's entry count bounded.
    pub fn locate(&self, digest_hex: &str) -> PathBuf {
        let (shard, rest) = digest_hex.split_at(SHARD_PREFIX_LEN);
        self.base.join(shard).join(rest)
    }

    /// Returns `true` if an artifact for the pair is already published.
    pub fn contains(&self, logical_key: &str, derivation_identity: &str) -> bool {
        self.locate(&fingerprint_hex(logical_key, derivation_identity))
            .exists()
    }

    /// Resolves the artifact for `(logical_key, derivation)`, running the
    /// derivation only on a miss.
    ///
    /// On a miss the derivation streams `input` into a private temporary
    /// file inside the cache root, which is then atomically renamed to the
    /// canonical path; a partial write is never visible as a hit.
    pub fn resolve_or_compute<D, R>(
        &self,
        logical_key: &str,
        derivation: &D,
        input: R,
    ) -> Result<Resolved, CacheError>
    where
        D: LineDerivation,
        R: BufRead,
    {
        let digest = fingerprint_hex(logical_key, &derivation.identity());
        let path = self.locate(&digest);

        if path.exists() {
            debug!(digest = %digest, "cache hit");
            return Ok(Resolved {
                path,
                hit: true,
                stats: None,
            });
        }

        // Collapse concurrent derivations of the same fingerprint into one.
        let slot = {
            let mut in_flight = self.in_flight.lock();
            in_flight.entry(digest.clone()).or_default().clone()
        };
        let _running = slot.lock();

        // A concurrent caller may have published while we waited.
        if path.exists() {
            debug!(digest = %digest, "cache hit after waiting on in-flight derivation");
            return Ok(Resolved {
                path,
                hit: true,
                stats: None,
            });
        }

        fs::create_dir_all(&self.base).map_err(|source| CacheError::RootCreationFailed {
            path: self.base.clone(),
            source,
        })?;

        let tmp = NamedTempFile::new_in(&self.base).map_err(|source| {
            CacheError::TempFileFailed {
                path: self.base.clone(),
                source,
            }
        })?;

        let stats = {
            let mut writer = BufWriter::new(tmp.as_file());
            let stats = derivation.run(input, &mut writer)?;
            writer
                .flush()
                .map_err(|source| CacheError::TempWriteFailed { source })?;
            stats
        };
        tmp.as_file()
            .sync_all()
            .map_err(|source| CacheError::TempWriteFailed { source })?;

        // Tolerates a concurrent process creating the same shard.
        let shard_dir = path.parent().unwrap_or(&self.base).to_path_buf();
        fs::create_dir_all(&shard_dir).map_err(|source| CacheError::ShardCreationFailed {
            path: shard_dir.clone(),
            source,
        })?;

        tmp.persist(&path).map_err(|e| CacheError::PublishFailed {
            path: path.clone(),
            source: e.error,
        })?;

        info!(
            digest = %digest,
            emitted = stats.emitted,
            skipped = stats.skipped(),
            "derivation artifact published"
        );

        Ok(Resolved {
            path,
            hit: false,
            stats: Some(stats),
        })
    }
}
