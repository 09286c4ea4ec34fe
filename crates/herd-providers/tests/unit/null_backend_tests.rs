//! Null backend tests

use herd_providers::KeyValueBackend;
use herd_providers::backend::NullBackend;
use std::time::Duration;

#[tokio::test]
async fn test_null_backend_never_stores() {
    let backend = NullBackend::new();

    backend
        .set_with_expiry("k", b"v", Duration::from_secs(60))
        .await
        .unwrap();
    assert!(backend.get("k").await.unwrap().is_none());
    assert!(!backend.delete("k").await.unwrap());
    assert!(backend.scan_keys_by_pattern("*").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_null_backend_lock_always_granted() {
    let backend = NullBackend::new();

    for _ in 0..3 {
        assert!(
            backend
                .set_if_absent_with_expiry("k:lock", b"t", Duration::from_secs(1))
                .await
                .unwrap()
        );
    }
    assert!(!backend.compare_and_delete("k:lock", b"t").await.unwrap());
}

#[tokio::test]
async fn test_null_backend_is_available() {
    let backend = NullBackend::new();
    assert!(backend.ping().await.is_ok());
    assert_eq!(backend.provider_name(), "null");
}
