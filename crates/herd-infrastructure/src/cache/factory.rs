//! Cache engine factory
//!
//! ```text
//! AppConfig → BackendProviderConfig → linkme registry → Arc<dyn KeyValueBackend>
//!           → CacheConfig → namespace, expiry policy, settings → CacheAsideService
//! ```

use crate::config::AppConfig;
use crate::config::types::{BackendConfig, CacheConfig};
use herd_application::CacheAsideService;
use herd_application::ports::registry::resolve_backend_provider;
use herd_domain::error::{Error, Result};
use herd_domain::ports::KeyValueBackend;
use herd_providers::codec::JsonCodec;
use std::sync::Arc;
use tracing::info;

/// Engine type produced from configuration
pub type JsonCache = CacheAsideService<JsonCodec>;

/// Factory for configured cache engines
pub struct CacheFactory;

impl CacheFactory {
    /// Resolve the configured backend from the registry
    pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn KeyValueBackend>> {
        resolve_backend_provider(&config.to_provider_config()).map_err(|message| {
            Error::configuration(format!(
                "Failed to create backend '{}': {message}",
                config.provider
            ))
        })
    }

    /// Build an engine over an existing backend
    pub fn create_with_backend(
        backend: Arc<dyn KeyValueBackend>,
        config: &CacheConfig,
    ) -> JsonCache {
        CacheAsideService::new(backend, JsonCodec)
            .with_namespace(config.to_namespace())
            .with_expiry_policy(config.to_expiry_policy())
            .with_settings(config.to_settings())
    }

    /// Build an engine from the full application configuration
    ///
    /// Does not contact the backend; use
    /// [`CacheAsideService::is_backend_available`] for that.
    pub fn create(config: &AppConfig) -> Result<JsonCache> {
        let backend = Self::create_backend(&config.backend)?;
        let cache = Self::create_with_backend(backend, &config.cache);
        info!(
            backend = %config.backend.provider,
            namespace = %config.cache.namespace,
            default_ttl_secs = config.cache.default_ttl_secs,
            operation_overrides = config.cache.operation_ttls.len(),
            "cache engine created"
        );
        Ok(cache)
    }
}
