//! Main application configuration

use super::{BackendConfig, CacheConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// ```toml
/// [cache]
/// namespace = "billing"
/// default_ttl_secs = 300
///
/// [cache.operation_ttls]
/// LoadInvoice = 600
///
/// [backend]
/// provider = "redis"
/// uri = "redis://cache.internal:6379"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Cache-aside engine settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Key-value backend selection
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
