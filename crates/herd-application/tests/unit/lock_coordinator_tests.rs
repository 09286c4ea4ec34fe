//! Lock coordinator tests

use herd_application::LockCoordinator;
use herd_domain::ports::KeyValueBackend;
use herd_domain::value_objects::LockToken;
use herd_providers::backend::MokaBackend;
use std::sync::Arc;
use std::time::Duration;

use crate::test_doubles::{FailingBackend, SlowAcquireBackend, eventually_absent};
use herd_domain::error::Error;
use tokio_util::sync::CancellationToken;

const TTL: Duration = Duration::from_secs(5);

fn coordinator() -> (Arc<MokaBackend>, LockCoordinator) {
    let backend = Arc::new(MokaBackend::new());
    (backend.clone(), LockCoordinator::new(backend))
}

#[tokio::test]
async fn test_only_one_owner_at_a_time() {
    let (_backend, locks) = coordinator();
    let first = LockToken::generate();
    let second = LockToken::generate();

    assert!(locks.try_acquire("k:lock", &first, TTL).await);
    assert!(!locks.try_acquire("k:lock", &second, TTL).await);

    assert!(locks.release("k:lock", &first).await);
    assert!(locks.try_acquire("k:lock", &second, TTL).await);
}

#[tokio::test]
async fn test_release_with_foreign_token_is_noop() {
    let (backend, locks) = coordinator();
    let owner = LockToken::generate();
    assert!(locks.try_acquire("k:lock", &owner, TTL).await);

    assert!(!locks.release("k:lock", &LockToken::from("intruder")).await);
    assert_eq!(
        backend.get("k:lock").await.unwrap(),
        Some(owner.as_bytes().to_vec())
    );
}

#[tokio::test]
async fn test_expired_holder_cannot_release_new_owner() {
    let (backend, locks) = coordinator();

    let stale = locks
        .acquire("k:lock", Duration::from_millis(30))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;

    let fresh = locks.acquire("k:lock", TTL).await.unwrap();
    assert_ne!(stale.token(), fresh.token());

    assert!(!stale.release().await);
    assert_eq!(
        backend.get("k:lock").await.unwrap(),
        Some(fresh.token().as_bytes().to_vec())
    );
    assert!(fresh.release().await);
}

#[tokio::test]
async fn test_dropped_lease_is_released() {
    let (backend, locks) = coordinator();

    {
        let lease = locks.acquire("k:lock", TTL).await.unwrap();
        assert_eq!(lease.key(), "k:lock");
    }
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(backend.get("k:lock").await.unwrap().is_none());
}

#[tokio::test]
async fn test_backend_failure_means_not_acquired() {
    let locks = LockCoordinator::new(Arc::new(FailingBackend));
    let token = LockToken::generate();

    assert!(!locks.try_acquire("k:lock", &token, TTL).await);
    assert!(!locks.release("k:lock", &token).await);
    assert!(locks.acquire("k:lock", TTL).await.is_none());
}

#[tokio::test]
async fn test_acquire_with_cancel_returns_lease() {
    let (backend, locks) = coordinator();
    let cancel = CancellationToken::new();

    let lease = locks
        .acquire_with_cancel("k:lock", TTL, &cancel)
        .await
        .unwrap()
        .unwrap();
    assert!(
        locks
            .acquire_with_cancel("k:lock", TTL, &cancel)
            .await
            .unwrap()
            .is_none()
    );

    assert!(lease.release().await);
    assert!(backend.get("k:lock").await.unwrap().is_none());
}

#[tokio::test]
async fn test_cancelled_acquire_releases_late_lock() {
    let backend = SlowAcquireBackend::new(Duration::from_millis(200));
    let locks = LockCoordinator::new(backend.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        trigger.cancel();
    });

    let result = locks.acquire_with_cancel("k:lock", TTL, &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)));
    // The set-if-absent landed before cancellation
    assert!(backend.inner().get("k:lock").await.unwrap().is_some());

    assert!(eventually_absent(backend.inner(), "k:lock").await);
}

#[tokio::test]
async fn test_dropped_acquire_releases_late_lock() {
    let backend = SlowAcquireBackend::new(Duration::from_millis(200));
    let locks = LockCoordinator::new(backend.clone());
    let cancel = CancellationToken::new();

    let abandoned = tokio::time::timeout(
        Duration::from_millis(30),
        locks.acquire_with_cancel("k:lock", TTL, &cancel),
    )
    .await;
    assert!(abandoned.is_err());

    assert!(eventually_absent(backend.inner(), "k:lock").await);
}
