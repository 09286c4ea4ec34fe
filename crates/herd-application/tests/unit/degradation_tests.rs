//! Graceful degradation tests
//!
//! Backend failures must never surface from the read paths.

use crate::test_doubles::{Calls, FailingBackend, RecordingBackend, User, engine};
use herd_domain::ports::KeyValueBackend;
use std::sync::Arc;

#[tokio::test]
async fn test_backend_outage_falls_back_to_producer() {
    let cache = engine(Arc::new(FailingBackend));
    let calls = Calls::default();

    for _ in 0..2 {
        let producer_calls = calls.clone();
        let value: User = cache
            .get_or_add("user:20", "LoadUser", move || async move {
                producer_calls.hit();
                Ok(User::new(20, "Uncached"))
            })
            .await
            .unwrap();
        assert_eq!(value, User::new(20, "Uncached"));
    }

    assert_eq!(calls.count(), 2);
    let stats = cache.stats();
    assert_eq!(stats.fallbacks, 2);
    assert_eq!(stats.populations, 0);
}

#[tokio::test]
async fn test_outage_on_other_entry_points() {
    let cache = engine(Arc::new(FailingBackend));

    assert!(!cache.is_backend_available().await);
    assert!(cache.get::<User>("user:21").await.is_none());
    assert!(
        cache
            .set("user:21", "LoadUser", &User::new(21, "x"))
            .await
            .unwrap_err()
            .is_backend()
    );
    assert!(!cache.remove("user:21").await);
    assert_eq!(cache.remove_by_pattern("user:*").await, 0);
}

#[tokio::test]
async fn test_write_failure_still_returns_value() {
    let backend = RecordingBackend::new();
    backend.fail_writes(true);
    let cache = engine(backend.clone());

    let value: User = cache
        .get_or_add("user:22", "LoadUser", || async { Ok(User::new(22, "Kept")) })
        .await
        .unwrap();

    assert_eq!(value, User::new(22, "Kept"));
    assert_eq!(cache.stats().populations, 0);
    let lock_key = cache.namespace().lock_key("user:22");
    assert!(backend.inner().get(&lock_key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_read_failure_after_lock_acquire_releases_lock() {
    let backend = RecordingBackend::new();
    // First read (the miss) succeeds; the re-read under the lock fails
    backend.fail_reads_from(1);
    let cache = engine(backend.clone());

    let value: User = cache
        .get_or_add("user:23", "LoadUser", || async { Ok(User::new(23, "Direct")) })
        .await
        .unwrap();

    assert_eq!(value, User::new(23, "Direct"));
    assert!(backend.writes().is_empty());
    assert_eq!(cache.stats().fallbacks, 1);
    let lock_key = cache.namespace().lock_key("user:23");
    assert!(backend.inner().get(&lock_key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_read_failure_while_waiting_falls_back() {
    let backend = RecordingBackend::new();
    let cache = engine(backend.clone());
    let lock_key = cache.namespace().lock_key("user:24");
    backend
        .inner()
        .set_if_absent_with_expiry(&lock_key, b"holder", std::time::Duration::from_secs(5))
        .await
        .unwrap();
    // Initial read succeeds, the first poll read fails
    backend.fail_reads_from(1);

    let value: User = cache
        .get_or_add("user:24", "LoadUser", || async { Ok(User::new(24, "Waiter")) })
        .await
        .unwrap();

    assert_eq!(value, User::new(24, "Waiter"));
    let stats = cache.stats();
    assert_eq!(stats.lock_contentions, 1);
    assert_eq!(stats.fallbacks, 1);
}
