//! Cache Factory Tests

use herd_infrastructure::cache::CacheFactory;
use herd_infrastructure::config::{AppConfig, BackendConfig, CacheConfig, ConfigBuilder};
use std::time::Duration;

#[tokio::test]
async fn test_factory_default_moka_engine_caches() {
    let cache = CacheFactory::create(&AppConfig::default()).unwrap();
    assert!(cache.is_backend_available().await);

    let first: String = cache
        .get_or_add("greeting", "Greet", || async { Ok("hello".to_string()) })
        .await
        .unwrap();
    let second: String = cache
        .get_or_add("greeting", "Greet", || async { Ok("changed".to_string()) })
        .await
        .unwrap();

    assert_eq!(first, "hello");
    assert_eq!(second, "hello");
}

#[test]
fn test_factory_applies_cache_config() {
    let config = ConfigBuilder::new()
        .with_cache(CacheConfig {
            namespace: "billing".to_string(),
            lock_ttl_ms: 2_000,
            ..CacheConfig::default()
        })
        .with_operation_ttl("LoadInvoice", 900)
        .build()
        .unwrap();

    let cache = CacheFactory::create(&config).unwrap();

    assert_eq!(cache.namespace().prefix(), "billing:");
    assert_eq!(
        cache.expiry_policy().resolve("LoadInvoice"),
        Duration::from_secs(900)
    );
    assert_eq!(cache.settings().lock_ttl, Duration::from_secs(2));
    assert_eq!(cache.backend().provider_name(), "moka");
}

#[test]
fn test_factory_null_backend() {
    let backend = CacheFactory::create_backend(&BackendConfig {
        provider: "null".to_string(),
        ..BackendConfig::default()
    })
    .unwrap();
    assert_eq!(backend.provider_name(), "null");
}

#[test]
fn test_factory_redis_backend_is_lazy() {
    let backend = CacheFactory::create_backend(&BackendConfig {
        provider: "redis".to_string(),
        uri: Some("redis://127.0.0.1:1".to_string()),
        max_capacity: None,
    })
    .unwrap();
    assert_eq!(backend.provider_name(), "redis");
}

#[test]
fn test_factory_unknown_backend_is_configuration_error() {
    let result = CacheFactory::create_backend(&BackendConfig {
        provider: "memcached".to_string(),
        ..BackendConfig::default()
    });
    assert!(matches!(
        result,
        Err(herd_domain::error::Error::Configuration { .. })
    ));
}
