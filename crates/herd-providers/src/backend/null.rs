//! Null backend
//!
//! A backend that doesn't store anything. Every read misses and every
//! lock acquire succeeds, so the engine degrades to calling the production
//! function on each request. Useful for disabling caching.

use async_trait::async_trait;
use herd_domain::error::Result;
use herd_domain::ports::KeyValueBackend;
use std::sync::Arc;
use std::time::Duration;

/// Null backend that doesn't store anything
///
/// # Example
///
/// ```rust
/// use herd_providers::backend::NullBackend;
///
/// let backend = NullBackend::new();
/// // All operations succeed but nothing is stored
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValueBackend for NullBackend {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set_with_expiry(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn set_if_absent_with_expiry(
        &self,
        _key: &str,
        _value: &[u8],
        _ttl: Duration,
    ) -> Result<bool> {
        // Nothing is ever present, so the write "succeeds"
        Ok(true)
    }

    async fn compare_and_delete(&self, _key: &str, _expected: &[u8]) -> Result<bool> {
        Ok(false)
    }

    async fn scan_keys_by_pattern(&self, _pattern: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use herd_application::ports::registry::{
    BACKEND_PROVIDERS, BackendProviderConfig, BackendProviderEntry,
};

#[linkme::distributed_slice(BACKEND_PROVIDERS)]
static NULL_BACKEND: BackendProviderEntry = BackendProviderEntry {
    name: "null",
    description: "No-op backend, caching disabled",
    factory: |_config: &BackendProviderConfig| Ok(Arc::new(NullBackend::new())),
};
