//! Tests for the backend registry
//!
//! Uses `extern crate herd_providers` to force linkme registration of real providers.

extern crate herd_providers;

use crate::test_doubles::{Calls, engine};
use herd_application::ports::registry::{
    BackendProviderConfig, list_backend_providers, resolve_backend_provider,
};

#[test]
fn test_registered_providers_are_listed_sorted() {
    let providers = list_backend_providers();
    let names: Vec<&str> = providers.iter().map(|(name, _)| *name).collect();

    assert!(names.contains(&"moka"));
    assert!(names.contains(&"null"));
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_resolved_moka_backend_caches() {
    let backend = resolve_backend_provider(&BackendProviderConfig::new("moka")).unwrap();
    let cache = engine(backend);
    let calls = Calls::default();

    for _ in 0..2 {
        let producer_calls = calls.clone();
        let _: String = cache
            .get_or_add("greeting", "Greet", move || async move {
                producer_calls.hit();
                Ok("hello".to_string())
            })
            .await
            .unwrap();
    }
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn test_resolved_null_backend_disables_caching() {
    let backend = resolve_backend_provider(&BackendProviderConfig::new("null")).unwrap();
    let cache = engine(backend);
    let calls = Calls::default();

    for _ in 0..2 {
        let producer_calls = calls.clone();
        let _: String = cache
            .get_or_add("greeting", "Greet", move || async move {
                producer_calls.hit();
                Ok("hello".to_string())
            })
            .await
            .unwrap();
    }
    assert_eq!(calls.count(), 2);
    assert!(cache.is_backend_available().await);
}

#[test]
fn test_unknown_provider_fails() {
    let result = resolve_backend_provider(&BackendProviderConfig::new("nonexistent"));
    assert!(result.is_err());
}
