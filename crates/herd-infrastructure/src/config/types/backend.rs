//! Backend configuration types

use crate::constants::DEFAULT_BACKEND_PROVIDER;
use herd_application::ports::registry::BackendProviderConfig;
use serde::{Deserialize, Serialize};

/// Backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackendConfig {
    /// Registered provider name ("redis", "moka", "null")
    pub provider: String,

    /// Connection URI (Redis)
    pub uri: Option<String>,

    /// Maximum number of entries (Moka)
    pub max_capacity: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_BACKEND_PROVIDER.to_string(),
            uri: None,
            max_capacity: None,
        }
    }
}

impl BackendConfig {
    /// Registry lookup config for this backend
    pub fn to_provider_config(&self) -> BackendProviderConfig {
        let mut config = BackendProviderConfig::new(&self.provider);
        if let Some(uri) = &self.uri {
            config = config.with_uri(uri);
        }
        if let Some(max_capacity) = self.max_capacity {
            config = config.with_max_capacity(max_capacity);
        }
        config
    }
}
