use super::*;

use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};

use tempfile::TempDir;

use crate::derivation::{DeriveError, DeriveStats, TitleProjection};

/// Copies input lines through unchanged, counting how often it runs.
struct CountingDerivation {
    identity: String,
    runs: AtomicU64,
}

impl CountingDerivation {
    fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            runs: AtomicU64::new(0),
        }
    }

    fn runs(&self) -> u64 {
        self.runs.load(Ordering::SeqCst)
    }
}

impl LineDerivation for CountingDerivation {
    fn identity(&self) -> String {
        self.identity.clone()
    }

    fn run<R: BufRead, W: Write>(&self, input: R, mut out: W) -> Result<DeriveStats, DeriveError> {
        self.runs.fetch_add(1, Ordering::SeqCst);

        let mut stats = DeriveStats::default();
        for (line_no, line) in input.lines().enumerate() {
            let line = line.map_err(|source| DeriveError::Read {
                line_no: line_no as u64 + 1,
                source,
            })?;
            writeln!(out, "{}", line).map_err(|source| DeriveError::Write { source })?;
            stats.emitted += 1;
        }
        Ok(stats)
    }
}

/// Fails after part of the output has been written.
struct FailingDerivation;

impl LineDerivation for FailingDerivation {
    fn identity(&self) -> String {
        "failing/v1".to_string()
    }

    fn run<R: BufRead, W: Write>(&self, _input: R, mut out: W) -> Result<DeriveStats, DeriveError> {
        writeln!(out, "partial").map_err(|source| DeriveError::Write { source })?;
        Err(DeriveError::Write {
            source: std::io::Error::other("simulated failure"),
        })
    }
}

#[test]
fn test_locate_shards_on_first_two_hex_chars() {
    let cache = ContentCache::new("/tmp/cache-root");

    let path = cache.locate("ab34cd");

    assert_eq!(path, PathBuf::from("/tmp/cache-root/ab/34cd"));
}

#[test]
fn test_resolve_or_compute_runs_derivation_once() {
    let dir = TempDir::new().unwrap();
    let cache = ContentCache::new(dir.path());
    let derivation = CountingDerivation::new("copy/v1");

    let first = cache
        .resolve_or_compute("snapshot", &derivation, Cursor::new("a\nb\n"))
        .unwrap();
    let second = cache
        .resolve_or_compute("snapshot", &derivation, Cursor::new("a\nb\n"))
        .unwrap();

    assert_eq!(derivation.runs(), 1);
    assert_eq!(first.path, second.path);
    assert!(!first.hit);
    assert!(second.hit);
    assert_eq!(first.stats.map(|s| s.emitted), Some(2));
    assert!(second.stats.is_none());
    assert_eq!(fs::read_to_string(&second.path).unwrap(), "a\nb\n");
}

#[test]
fn test_identity_change_invalidates_while_key_constant() {
    let dir = TempDir::new().unwrap();
    let cache = ContentCache::new(dir.path());
    let v1 = CountingDerivation::new("copy/v1");
    let v2 = CountingDerivation::new("copy/v2");

    let first = cache
        .resolve_or_compute("snapshot", &v1, Cursor::new("a\n"))
        .unwrap();
    let second = cache
        .resolve_or_compute("snapshot", &v2, Cursor::new("a\n"))
        .unwrap();

    assert_ne!(first.path, second.path);
    assert_eq!(v1.runs(), 1);
    assert_eq!(v2.runs(), 1);
}

#[test]
fn test_logical_key_change_invalidates() {
    let dir = TempDir::new().unwrap();
    let cache = ContentCache::new(dir.path());
    let derivation = CountingDerivation::new("copy/v1");

    let first = cache
        .resolve_or_compute("snapshot-a", &derivation, Cursor::new("a\n"))
        .unwrap();
    let second = cache
        .resolve_or_compute("snapshot-b", &derivation, Cursor::new("a\n"))
        .unwrap();

    assert_ne!(first.path, second.path);
    assert_eq!(derivation.runs(), 2);
}

#[test]
fn test_failed_derivation_publishes_nothing() {
    let dir = TempDir::new().unwrap();
    let cache = ContentCache::new(dir.path());
    let derivation = FailingDerivation;

    let result = cache.resolve_or_compute("snapshot", &derivation, Cursor::new("a\n"));

    assert!(matches!(result, Err(CacheError::Derive(_))));
    assert!(!cache.contains("snapshot", &derivation.identity()));

    // The retried call redoes the full derivation and can succeed.
    let replacement = CountingDerivation::new("failing/v1");
    let retry = cache.resolve_or_compute("snapshot", &replacement, Cursor::new("a\n"));
    assert!(retry.is_ok());
}

#[test]
fn test_artifact_lands_under_sharded_path() {
    let dir = TempDir::new().unwrap();
    let cache = ContentCache::new(dir.path());
    let projection = TitleProjection::default();

    let resolved = cache
        .resolve_or_compute(
            "snapshot",
            &projection,
            Cursor::new("{\"ident\":\"w1\",\"title\":\"Ok\"}\n"),
        )
        .unwrap();

    let shard = resolved
        .path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap()
        .to_string();
    assert_eq!(shard.len(), 2);
    assert!(resolved.path.starts_with(dir.path()));
    assert_eq!(fs::read_to_string(&resolved.path).unwrap(), "w1\tOk\n");
}

#[test]
fn test_concurrent_resolves_collapse_to_one_run() {
    let dir = TempDir::new().unwrap();
    let cache = ContentCache::new(dir.path());
    let derivation = std::sync::Arc::new(CountingDerivation::new("copy/v1"));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let cache = cache.clone();
            let derivation = std::sync::Arc::clone(&derivation);
            scope.spawn(move || {
                cache
                    .resolve_or_compute("snapshot", derivation.as_ref(), Cursor::new("a\n"))
                    .unwrap();
            });
        }
    });

    assert_eq!(derivation.runs(), 1);
}
