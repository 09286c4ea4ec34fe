//! Environment variable configuration tests
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p herd-infrastructure --test unit config_env -- --test-threads=1 --ignored
//! ```
//!
//! # Safety
//!
//! Rust 2024 requires `unsafe` for `env::set_var`/`env::remove_var`.
//! Tests MUST run with `--test-threads=1` to prevent data races.

use herd_infrastructure::config::ConfigLoader;
use std::env;

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_nested_env_vars_override_defaults() {
    set_env("HERD_CACHE__DEFAULT_TTL_SECS", "900");
    set_env("HERD_BACKEND__PROVIDER", "null");

    let config = ConfigLoader::new().load();

    remove_env("HERD_CACHE__DEFAULT_TTL_SECS");
    remove_env("HERD_BACKEND__PROVIDER");

    let config = config.unwrap();
    assert_eq!(config.cache.default_ttl_secs, 900);
    assert_eq!(config.backend.provider, "null");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_invalid_env_value_fails_validation() {
    set_env("HERD_CACHE__MAX_POLL_ATTEMPTS", "0");

    let result = ConfigLoader::new().load();

    remove_env("HERD_CACHE__MAX_POLL_ATTEMPTS");
    assert!(result.is_err());
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_custom_prefix() {
    set_env("HERDTEST_CACHE__NAMESPACE", "custom");

    let config = ConfigLoader::new().with_env_prefix("HERDTEST").load();

    remove_env("HERDTEST_CACHE__NAMESPACE");
    assert_eq!(config.unwrap().cache.namespace, "custom");
}
