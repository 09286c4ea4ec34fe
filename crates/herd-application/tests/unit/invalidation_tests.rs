//! Invalidation tests

use crate::test_doubles::{User, engine};
use herd_application::CacheInvalidationInterface;
use herd_domain::ports::KeyValueBackend;
use herd_domain::value_objects::KeyNamespace;
use herd_providers::backend::MokaBackend;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_remove_single_key() {
    let cache = engine(Arc::new(MokaBackend::new()));
    cache
        .set("user:30", "LoadUser", &User::new(30, "Gone"))
        .await
        .unwrap();

    assert!(cache.remove("user:30").await);
    assert!(!cache.remove("user:30").await);
    assert!(cache.get::<User>("user:30").await.is_none());
}

#[tokio::test]
async fn test_remove_by_pattern_skips_locks_and_other_keys() {
    let backend = Arc::new(MokaBackend::new());
    let cache = engine(backend.clone());
    for id in [31, 32] {
        cache
            .set(&format!("user:{id}"), "LoadUser", &User::new(id, "Match"))
            .await
            .unwrap();
    }
    cache.set("order:1", "LoadOrder", &42u32).await.unwrap();
    let lock_key = cache.namespace().lock_key("user:33");
    backend
        .set_if_absent_with_expiry(&lock_key, b"holder", Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(cache.remove_by_pattern("user:*").await, 2);

    assert!(cache.get::<User>("user:31").await.is_none());
    assert!(cache.get::<User>("user:32").await.is_none());
    assert_eq!(cache.get::<u32>("order:1").await, Some(42));
    assert!(backend.get(&lock_key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_pattern_is_scoped_to_namespace() {
    let backend = Arc::new(MokaBackend::new());
    backend
        .set_with_expiry("foreign:user:1", b"{}", Duration::from_secs(60))
        .await
        .unwrap();
    let cache = engine(backend.clone());
    cache
        .set("user:34", "LoadUser", &User::new(34, "Ours"))
        .await
        .unwrap();

    assert_eq!(cache.remove_by_pattern("*").await, 1);
    assert!(backend.get("foreign:user:1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_invalidation_through_trait_object() {
    let cache = engine(Arc::new(MokaBackend::new()));
    cache
        .set("user:35", "LoadUser", &User::new(35, "Dyn"))
        .await
        .unwrap();
    let invalidation: Arc<dyn CacheInvalidationInterface> = Arc::new(cache.clone());

    assert_eq!(invalidation.remove_by_pattern("user:3?").await, 1);
    assert!(!invalidation.remove("user:35").await);
}

#[tokio::test]
async fn test_lock_suffixed_keys_are_reserved_for_locks() {
    let cache = engine(Arc::new(MokaBackend::new()));
    // "session:lock" is also the lock key guarding "session"
    cache.set("session:lock", "LoadSession", &7u32).await.unwrap();
    cache.set("session:data", "LoadSession", &8u32).await.unwrap();

    assert_eq!(cache.remove_by_pattern("session:*").await, 1);
    assert_eq!(cache.get::<u32>("session:lock").await, Some(7));

    assert!(cache.remove("session:lock").await);
    assert!(cache.get::<u32>("session:lock").await.is_none());
}

#[tokio::test]
async fn test_glob_characters_in_namespace_stay_literal() {
    let backend = Arc::new(MokaBackend::new());
    let wide = engine(backend.clone()).with_namespace(KeyNamespace::new("a*"));
    let neighbour = engine(backend.clone()).with_namespace(KeyNamespace::new("ab"));
    wide.set("user:1", "LoadUser", &User::new(1, "Wide")).await.unwrap();
    neighbour
        .set("user:1", "LoadUser", &User::new(1, "Neighbour"))
        .await
        .unwrap();

    assert_eq!(wide.remove_by_pattern("user:*").await, 1);
    assert_eq!(
        neighbour.get::<User>("user:1").await,
        Some(User::new(1, "Neighbour"))
    );
}
