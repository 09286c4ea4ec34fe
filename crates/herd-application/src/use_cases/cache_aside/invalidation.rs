//! Invalidation API
//!
//! Single-key and pattern-based removal. Both are best-effort: backend
//! failures are logged, never returned.

use super::CacheAsideService;
use crate::domain_services::CacheInvalidationInterface;
use async_trait::async_trait;
use herd_domain::constants::LOCK_KEY_SUFFIX;
use herd_domain::ports::ValueCodec;
use tracing::{debug, warn};

impl<C: ValueCodec> CacheAsideService<C> {
    /// Delete the entry for a logical key
    ///
    /// # Returns
    /// True if an entry was removed
    pub async fn remove(&self, key: &str) -> bool {
        let full_key = self.namespace.full_key(key);
        match self.backend.delete(&full_key).await {
            Ok(removed) => {
                debug!(key = %full_key, removed, "cache entry removed");
                removed
            }
            Err(e) => {
                warn!(key = %full_key, error = %e, "cache remove failed");
                false
            }
        }
    }

    /// Delete every entry whose logical key matches `pattern`
    ///
    /// The pattern is glob syntax, applied after the namespace prefix.
    /// Lock entries are skipped so a live lock holder keeps its exclusivity.
    /// Every logical key ending in `:lock` is the lock key of another
    /// logical key, so such keys are only removable one at a time through
    /// [`Self::remove`].
    ///
    /// # Returns
    /// Number of entries removed
    pub async fn remove_by_pattern(&self, pattern: &str) -> usize {
        let backend_pattern = self.namespace.pattern(pattern);
        let keys = match self.backend.scan_keys_by_pattern(&backend_pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(pattern = %backend_pattern, error = %e, "cache key scan failed");
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys.iter().filter(|k| !k.ends_with(LOCK_KEY_SUFFIX)) {
            match self.backend.delete(key).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(key = %key, error = %e, "cache remove failed during pattern removal");
                }
            }
        }

        debug!(
            pattern = %backend_pattern,
            matched = keys.len(),
            removed,
            "cache entries removed by pattern"
        );
        removed
    }
}

#[async_trait]
impl<C: ValueCodec> CacheInvalidationInterface for CacheAsideService<C> {
    async fn remove(&self, key: &str) -> bool {
        CacheAsideService::remove(self, key).await
    }

    async fn remove_by_pattern(&self, pattern: &str) -> usize {
        CacheAsideService::remove_by_pattern(self, pattern).await
    }
}
