use super::*;

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_bibmatch_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("BIBMATCH_INDEX_URL");
        env::remove_var("BIBMATCH_TIMEOUT_MS");
        env::remove_var("BIBMATCH_CACHE_DIR");
        env::remove_var("BIBMATCH_SERIALS_PATH");
        env::remove_var("BIBMATCH_WORKERS");
        env::remove_var("BIBMATCH_CONTAINER_INDEX");
        env::remove_var("BIBMATCH_RELEASE_INDEX");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.index_url, "http://localhost:9200");
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.cache_dir, PathBuf::from("./.cache"));
    assert!(config.serials_path.is_none());
    assert_eq!(config.workers, 20);
    assert_eq!(config.container_index, "fatcat_container");
    assert_eq!(config.release_index, "fatcat_release");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_bibmatch_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.index_url, DEFAULT_INDEX_URL);
    assert_eq!(config.workers, 20);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_bibmatch_env();

    let config = with_env_vars(
        &[
            ("BIBMATCH_INDEX_URL", "http://search.example.org:9200"),
            ("BIBMATCH_TIMEOUT_MS", "2500"),
            ("BIBMATCH_CACHE_DIR", "/var/cache/bibmatch"),
            ("BIBMATCH_WORKERS", "4"),
            ("BIBMATCH_RELEASE_INDEX", "releases_v2"),
        ],
        || Config::from_env().expect("overrides should parse"),
    );

    assert_eq!(config.index_url, "http://search.example.org:9200");
    assert_eq!(config.request_timeout, Duration::from_millis(2500));
    assert_eq!(config.cache_dir, PathBuf::from("/var/cache/bibmatch"));
    assert_eq!(config.workers, 4);
    assert_eq!(config.release_index, "releases_v2");
    assert_eq!(config.container_index, "fatcat_container");
}

#[test]
#[serial]
fn test_invalid_workers_rejected() {
    clear_bibmatch_env();

    let zero = with_env_vars(&[("BIBMATCH_WORKERS", "0")], Config::from_env);
    assert!(matches!(zero, Err(ConfigError::InvalidWorkers { .. })));

    let garbage = with_env_vars(&[("BIBMATCH_WORKERS", "many")], Config::from_env);
    assert!(matches!(garbage, Err(ConfigError::WorkersParseError { .. })));
}

#[test]
#[serial]
fn test_invalid_timeout_rejected() {
    clear_bibmatch_env();

    let zero = with_env_vars(&[("BIBMATCH_TIMEOUT_MS", "0")], Config::from_env);
    assert!(matches!(zero, Err(ConfigError::InvalidTimeout { .. })));
}

#[test]
fn test_validate_rejects_missing_serials_path() {
    let config = Config {
        serials_path: Some(PathBuf::from("/nonexistent/serials.tsv")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_rejects_file_as_cache_dir() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = Config {
        cache_dir: file.path().to_path_buf(),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}
