//! Cache configuration types

use herd_domain::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_LOCK_TTL_MS, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_NAMESPACE,
    DEFAULT_POLL_INTERVAL_MS,
};
use herd_domain::value_objects::{ExpiryPolicy, KeyNamespace, StampedeSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Namespace for cache keys; empty disables prefixing
    pub namespace: String,

    /// TTL in seconds for operations without an override
    pub default_ttl_secs: u64,

    /// Per-operation TTL overrides in seconds
    pub operation_ttls: HashMap<String, u64>,

    /// Lock entry TTL in milliseconds
    pub lock_ttl_ms: u64,

    /// Delay between polls while another caller holds the lock
    pub poll_interval_ms: u64,

    /// Polls before a waiter gives up and produces uncached
    pub max_poll_attempts: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            operation_ttls: HashMap::new(),
            lock_ttl_ms: DEFAULT_LOCK_TTL_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl CacheConfig {
    /// Key namespace built from `namespace`
    pub fn to_namespace(&self) -> KeyNamespace {
        KeyNamespace::new(&self.namespace)
    }

    /// Expiry policy built from the default TTL and overrides
    pub fn to_expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::new(Duration::from_secs(self.default_ttl_secs)).with_operation_ttls(
            self.operation_ttls
                .iter()
                .map(|(operation, secs)| (operation.clone(), Duration::from_secs(*secs))),
        )
    }

    /// Lock and polling settings
    pub fn to_settings(&self) -> StampedeSettings {
        StampedeSettings::new(
            Duration::from_millis(self.lock_ttl_ms),
            Duration::from_millis(self.poll_interval_ms),
            self.max_poll_attempts,
        )
    }
}
