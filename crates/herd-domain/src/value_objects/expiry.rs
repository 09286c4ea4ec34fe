//! Per-operation expiry policy

use crate::constants::DEFAULT_CACHE_TTL_SECS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Maps an operation name to the TTL used when populating its entries
///
/// Lookups are exact and case-sensitive; unmapped names get the default.
///
/// # Example
///
/// ```
/// use herd_domain::value_objects::ExpiryPolicy;
/// use std::time::Duration;
///
/// let policy = ExpiryPolicy::new(Duration::from_secs(300))
///     .with_operation_ttl("TestMethod", Duration::from_secs(600));
///
/// assert_eq!(policy.resolve("TestMethod"), Duration::from_secs(600));
/// assert_eq!(policy.resolve("Other"), Duration::from_secs(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    default_ttl: Duration,
    overrides: HashMap<String, Duration>,
}

impl ExpiryPolicy {
    /// Create a policy with only a default TTL
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            overrides: HashMap::new(),
        }
    }

    /// Map an operation name to its own TTL
    pub fn with_operation_ttl<S: Into<String>>(mut self, operation: S, ttl: Duration) -> Self {
        self.overrides.insert(operation.into(), ttl);
        self
    }

    /// Add several operation mappings at once
    pub fn with_operation_ttls<I, S>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = (S, Duration)>,
        S: Into<String>,
    {
        self.overrides
            .extend(mappings.into_iter().map(|(name, ttl)| (name.into(), ttl)));
        self
    }

    /// Resolve the TTL for an operation
    pub fn resolve(&self, operation: &str) -> Duration {
        self.overrides
            .get(operation)
            .copied()
            .unwrap_or(self.default_ttl)
    }

    /// The TTL used for unmapped operations
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Number of operation-specific mappings
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}
