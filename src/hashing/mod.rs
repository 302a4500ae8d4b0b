//! BLAKE3 fingerprints for cached derivation artifacts.

use blake3::Hasher;

/// Fingerprint identifying one `(logical key, derivation identity)` pair.
///
/// The logical key tags the input snapshot (e.g. a hash of the raw dump),
/// the derivation identity is the transform's own version string. Changing
/// either yields a new fingerprint, so stale artifacts are never resolved.
/// The separator keeps `("ab", "c")` and `("a", "bc")` distinct.
pub fn fingerprint_artifact(logical_key: &str, derivation_identity: &str) -> blake3::Hash {
    let mut hasher = Hasher::new();
    hasher.update(logical_key.as_bytes());
    hasher.update(b"|");
    hasher.update(derivation_identity.as_bytes());
    hasher.finalize()
}

/// Hex form of [`fingerprint_artifact`], used for cache paths.
pub fn fingerprint_hex(logical_key: &str, derivation_identity: &str) -> String {
    fingerprint_artifact(logical_key, derivation_identity)
        .to_hex()
        .to_string()
}
