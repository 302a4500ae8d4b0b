//! Shared limits and index names.

/// Result-size cap used when a caller passes `None` or `Some(0)` as the
/// requested candidate count ("as many as the index will give").
pub const UNBOUNDED_RESULT_SIZE: u64 = 10_000;

/// Default container index name.
pub const CONTAINER_INDEX: &str = "fatcat_container";

/// Default release index name.
pub const RELEASE_INDEX: &str = "fatcat_release";

/// Hex characters forming the first (directory) level of the cache layout.
pub const SHARD_PREFIX_LEN: usize = 2;

/// Default number of concurrent lookups in batch retrieval.
pub const DEFAULT_WORKERS: usize = 20;
