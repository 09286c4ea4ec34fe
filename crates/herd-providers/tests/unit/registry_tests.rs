//! Backend registry tests
//!
//! Linking this crate populates the registry.

use herd_application::ports::registry::{
    BackendProviderConfig, list_backend_providers, resolve_backend_provider,
};

#[test]
fn test_null_backend_registered() {
    let names: Vec<&str> = list_backend_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(names.contains(&"null"));
}

#[cfg(feature = "backend-moka")]
#[test]
fn test_resolve_moka_with_capacity() {
    let backend =
        resolve_backend_provider(&BackendProviderConfig::new("moka").with_max_capacity(16))
            .unwrap();
    assert_eq!(backend.provider_name(), "moka");
}

#[cfg(feature = "backend-redis")]
#[test]
fn test_resolve_redis_without_connecting() {
    let backend = resolve_backend_provider(
        &BackendProviderConfig::new("redis").with_uri("redis://127.0.0.1:1"),
    )
    .unwrap();
    assert_eq!(backend.provider_name(), "redis");
}

#[test]
fn test_unknown_provider_lists_available() {
    let err = resolve_backend_provider(&BackendProviderConfig::new("memcached")).unwrap_err();
    assert!(err.contains("memcached"));
    assert!(err.contains("null"));
}

#[cfg(feature = "backend-redis")]
#[test]
fn test_resolve_redis_rejects_bad_scan_count() {
    let err = resolve_backend_provider(
        &BackendProviderConfig::new("redis")
            .with_uri("redis://127.0.0.1:1")
            .with_extra("scan_count", "many"),
    )
    .unwrap_err();
    assert!(err.contains("scan_count"));
}
