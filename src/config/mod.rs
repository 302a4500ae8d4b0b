//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `BIBMATCH_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{CONTAINER_INDEX, DEFAULT_WORKERS, RELEASE_INDEX};

/// Default search index URL used when `BIBMATCH_INDEX_URL` is not set.
pub const DEFAULT_INDEX_URL: &str = "http://localhost:9200";

/// Settings loaded from environment variables.
///
/// Use [`Config::from_env`] to read `BIBMATCH_*` overrides on top of
/// defaults. The cache directory is an explicit value threaded through
/// construction, so caches stay relocatable and testable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Search index endpoint URL. Default: `http://localhost:9200`.
    pub index_url: String,

    /// Per-request timeout for index queries. Default: 10 seconds.
    pub request_timeout: Duration,

    /// Root directory for the content-addressed cache. Default: `./.cache`.
    pub cache_dir: PathBuf,

    /// Serial-name table artifact (projection output), if available.
    pub serials_path: Option<PathBuf>,

    /// Concurrent lookups in batch retrieval. Default: `20`.
    pub workers: usize,

    /// Container index name. Default: `fatcat_container`.
    pub container_index: String,

    /// Release index name. Default: `fatcat_release`.
    pub release_index: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            cache_dir: PathBuf::from("./.cache"),
            serials_path: None,
            workers: DEFAULT_WORKERS,
            container_index: CONTAINER_INDEX.to_string(),
            release_index: RELEASE_INDEX.to_string(),
        }
    }
}

impl Config {
    const ENV_INDEX_URL: &'static str = "BIBMATCH_INDEX_URL";
    const ENV_TIMEOUT_MS: &'static str = "BIBMATCH_TIMEOUT_MS";
    const ENV_CACHE_DIR: &'static str = "BIBMATCH_CACHE_DIR";
    const ENV_SERIALS_PATH: &'static str = "BIBMATCH_SERIALS_PATH";
    const ENV_WORKERS: &'static str = "BIBMATCH_WORKERS";
    const ENV_CONTAINER_INDEX: &'static str = "BIBMATCH_CONTAINER_INDEX";
    const ENV_RELEASE_INDEX: &'static str = "BIBMATCH_RELEASE_INDEX";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let index_url = Self::parse_string_from_env(Self::ENV_INDEX_URL, defaults.index_url);
        let request_timeout = Self::parse_timeout_from_env(defaults.request_timeout)?;
        let cache_dir = Self::parse_path_from_env(Self::ENV_CACHE_DIR, defaults.cache_dir);
        let serials_path = Self::parse_optional_path_from_env(Self::ENV_SERIALS_PATH);
        let workers = Self::parse_workers_from_env(defaults.workers)?;
        let container_index =
            Self::parse_string_from_env(Self::ENV_CONTAINER_INDEX, defaults.container_index);
        let release_index =
            Self::parse_string_from_env(Self::ENV_RELEASE_INDEX, defaults.release_index);

        Ok(Self {
            index_url,
            request_timeout,
            cache_dir,
            serials_path,
            workers,
            container_index,
            release_index,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.exists() && !self.cache_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.cache_dir.clone(),
            });
        }

        if let Some(ref path) = self.serials_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers {
                value: self.workers.to_string(),
            });
        }

        Ok(())
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_TIMEOUT_MS) {
            Ok(value) => {
                let millis: u64 = value.parse().map_err(|e| ConfigError::TimeoutParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if millis == 0 {
                    return Err(ConfigError::InvalidTimeout { value });
                }

                Ok(Duration::from_millis(millis))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_workers_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_WORKERS) {
            Ok(value) => {
                let workers: usize =
                    value.parse().map_err(|e| ConfigError::WorkersParseError {
                        value: value.clone(),
                        source: e,
                    })?;

                if workers == 0 {
                    return Err(ConfigError::InvalidWorkers { value });
                }

                Ok(workers)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
