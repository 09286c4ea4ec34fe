//! Cache invalidation interface

use async_trait::async_trait;

/// Best-effort cache invalidation
///
/// Neither operation fails: backend errors are logged and reported as
/// "nothing removed".
#[async_trait]
pub trait CacheInvalidationInterface: Send + Sync {
    /// Remove a single logical key
    ///
    /// # Returns
    /// True if an entry was removed
    async fn remove(&self, key: &str) -> bool;

    /// Remove every logical key matching a glob pattern
    ///
    /// # Returns
    /// Number of entries removed
    async fn remove_by_pattern(&self, pattern: &str) -> usize;
}
