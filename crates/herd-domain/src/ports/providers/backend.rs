//! Key-Value Backend Port
//!
//! Port for the shared store every cache client talks to. The backend is the
//! single source of truth for mutual exclusion, so the two conditional
//! primitives must be atomic on the server side.
//!
//! ## Implementations
//!
//! - **Redis**: distributed store, compare-and-delete via a Lua script
//! - **Moka**: in-process store emulating the same primitives
//! - **Null**: stores nothing, for disabling caching

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Key-Value Backend Port
///
/// Implementations must be safe to share across tasks; one instance is
/// created per process and injected as `Arc<dyn KeyValueBackend>`.
///
/// # Example
///
/// ```ignore
/// use herd_domain::ports::KeyValueBackend;
/// use std::time::Duration;
///
/// let acquired = backend
///     .set_if_absent_with_expiry("herd:user:42:lock", b"token", Duration::from_secs(30))
///     .await?;
/// if acquired {
///     backend.compare_and_delete("herd:user:42:lock", b"token").await?;
/// }
/// ```
#[async_trait]
pub trait KeyValueBackend: Send + Sync + std::fmt::Debug {
    /// Read the raw bytes stored under `key`
    ///
    /// # Returns
    /// The stored bytes, or None if the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, overwriting any previous value
    ///
    /// # Arguments
    /// * `key` - Full cache key
    /// * `value` - Encoded bytes
    /// * `ttl` - Time after which the backend drops the entry
    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Delete `key`
    ///
    /// # Returns
    /// True if the key existed and was removed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Store `value` under `key` only if the key is absent, in one round-trip
    ///
    /// # Returns
    /// True if the value was stored, false if the key already held a live value
    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<bool>;

    /// Delete `key` only if its current value equals `expected`, atomically
    ///
    /// # Returns
    /// True if the key matched and was removed
    async fn compare_and_delete(&self, key: &str, expected: &[u8]) -> Result<bool>;

    /// Enumerate keys matching a glob `pattern` (`*`, `?`, `[...]`)
    async fn scan_keys_by_pattern(&self, pattern: &str) -> Result<Vec<String>>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()>;

    /// Get the name/identifier of this backend implementation
    ///
    /// # Returns
    /// A string identifier (e.g., "redis", "moka", "null")
    fn provider_name(&self) -> &str;
}
