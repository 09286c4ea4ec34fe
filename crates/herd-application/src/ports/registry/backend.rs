//! Backend Provider Registry
//!
//! Auto-registration system for key-value backends.
//! Providers register themselves via `#[linkme::distributed_slice(BACKEND_PROVIDERS)]`
//! and are discovered at runtime by iterating the slice.

use std::collections::HashMap;
use std::sync::Arc;

use herd_domain::ports::KeyValueBackend;

/// Configuration for backend provider creation
///
/// Contains all configuration options that a backend might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct BackendProviderConfig {
    /// Provider name (e.g., "redis", "moka", "null")
    pub provider: String,
    /// Connection URI (for distributed backends)
    pub uri: Option<String>,
    /// Maximum number of entries (for in-process backends)
    pub max_capacity: Option<u64>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl BackendProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the maximum capacity
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for backend providers
///
/// Each backend implementation registers itself with this entry.
/// The entry contains metadata and a factory function to create instances.
pub struct BackendProviderEntry {
    /// Unique provider name (e.g., "redis", "moka", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&BackendProviderConfig) -> Result<Arc<dyn KeyValueBackend>, String>,
}

#[linkme::distributed_slice]
pub static BACKEND_PROVIDERS: [BackendProviderEntry] = [..];

/// Resolve a backend by name from the registry
///
/// # Arguments
/// * `config` - Configuration containing provider name and settings
///
/// # Returns
/// * `Ok(Arc<dyn KeyValueBackend>)` - Created backend instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_backend_provider(
    config: &BackendProviderConfig,
) -> Result<Arc<dyn KeyValueBackend>, String> {
    let provider_name = &config.provider;

    for entry in BACKEND_PROVIDERS {
        if entry.name == provider_name {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = BACKEND_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown backend provider '{provider_name}'. Available providers: {available:?}"
    ))
}

/// List all registered backend providers
///
/// Returns (name, description) tuples, sorted by name. Useful for CLI help.
pub fn list_backend_providers() -> Vec<(&'static str, &'static str)> {
    let mut providers: Vec<(&'static str, &'static str)> = BACKEND_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    providers.sort_unstable_by_key(|(name, _)| *name);
    providers
}
