//! Moka in-process backend
//!
//! Emulates the shared-store primitives inside one process using Moka.
//! Mutual exclusion only holds between engines sharing the same
//! `MokaBackend` instance, which makes it the backend of choice for single
//! node deployments and for tests.
//!
//! Lock entries (keys ending in `:lock`) live in their own cache with no
//! capacity bound. Size-based admission and eviction only ever apply to
//! values; a lock leaves the store by release or by TTL.
//!
//! ## Features
//!
//! - Per-entry TTL via Moka's `Expiry`
//! - Capacity bound on values only, never on lock entries
//! - Atomic set-if-absent and compare-and-delete through the entry compute API
//! - Glob key scans (`*`, `?`, `[...]`)
//!
//! ## Example
//!
//! ```ignore
//! use herd_providers::backend::MokaBackend;
//!
//! let backend = MokaBackend::with_capacity(10_000);
//! ```

use crate::constants::MOKA_DEFAULT_MAX_CAPACITY;
use async_trait::async_trait;
use globset::GlobBuilder;
use herd_domain::constants::LOCK_KEY_SUFFIX;
use herd_domain::error::{Error, Result};
use herd_domain::ports::KeyValueBackend;
use moka::Expiry;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upper bound on a single entry's lifetime (one year)
const MAX_ENTRY_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Stored bytes with their own deadline
///
/// Moka evicts lazily, so every read also checks `expires_at`.
#[derive(Debug, Clone)]
struct StoredValue {
    bytes: Arc<[u8]>,
    ttl: Duration,
    expires_at: Instant,
}

impl StoredValue {
    fn new(bytes: &[u8], ttl: Duration) -> Self {
        let ttl = ttl.min(MAX_ENTRY_TTL);
        Self {
            bytes: Arc::from(bytes),
            ttl,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Expire each entry after its own TTL; overwrites restart the clock
struct PerEntryExpiry;

impl Expiry<String, StoredValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-process backend
#[derive(Clone)]
pub struct MokaBackend {
    values: Cache<String, StoredValue>,
    locks: Cache<String, StoredValue>,
    max_capacity: u64,
}

impl Default for MokaBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaBackend {
    /// Create a new Moka backend with default capacity
    pub fn new() -> Self {
        Self::with_capacity(MOKA_DEFAULT_MAX_CAPACITY)
    }

    /// Create a new Moka backend holding at most `max_capacity` values
    ///
    /// Lock entries do not count against the bound.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let values = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();
        let locks = Cache::builder().expire_after(PerEntryExpiry).build();

        Self {
            values,
            locks,
            max_capacity,
        }
    }

    /// Get the maximum capacity of the backend
    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    /// Approximate number of stored entries, including ones awaiting eviction
    pub async fn entry_count(&self) -> u64 {
        self.values.run_pending_tasks().await;
        self.locks.run_pending_tasks().await;
        self.values.entry_count() + self.locks.entry_count()
    }

    fn cache_for(&self, key: &str) -> &Cache<String, StoredValue> {
        if key.ends_with(LOCK_KEY_SUFFIX) {
            &self.locks
        } else {
            &self.values
        }
    }
}

#[async_trait]
impl KeyValueBackend for MokaBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .cache_for(key)
            .get(key)
            .await
            .filter(StoredValue::is_live)
            .map(|stored| stored.bytes.to_vec()))
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.cache_for(key)
            .insert(key.to_string(), StoredValue::new(value, ttl))
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self
            .cache_for(key)
            .remove(key)
            .await
            .is_some_and(|stored| stored.is_live()))
    }

    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<bool> {
        let stored = StoredValue::new(value, ttl);
        let result = self
            .cache_for(key)
            .entry_by_ref(key)
            .and_compute_with(|current| {
                let occupied = current.is_some_and(|entry| entry.value().is_live());
                let op = if occupied { Op::Nop } else { Op::Put(stored) };
                std::future::ready(op)
            })
            .await;

        Ok(matches!(
            result,
            CompResult::Inserted(_) | CompResult::ReplacedWith(_)
        ))
    }

    async fn compare_and_delete(&self, key: &str, expected: &[u8]) -> Result<bool> {
        let result = self
            .cache_for(key)
            .entry_by_ref(key)
            .and_compute_with(|current| {
                let matches = current.is_some_and(|entry| {
                    let stored = entry.value();
                    stored.is_live() && stored.bytes.as_ref() == expected
                });
                let op = if matches { Op::Remove } else { Op::Nop };
                std::future::ready(op)
            })
            .await;

        Ok(matches!(result, CompResult::Removed(_)))
    }

    async fn scan_keys_by_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| {
                Error::backend_with_source(format!("Invalid key pattern '{pattern}': {e}"), e)
            })?
            .compile_matcher();

        let mut keys: Vec<String> = self
            .values
            .iter()
            .chain(self.locks.iter())
            .filter(|(key, stored)| stored.is_live() && matcher.is_match(key.as_str()))
            .map(|(key, _)| key.as_ref().clone())
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("max_capacity", &self.max_capacity)
            .field("values", &self.values.entry_count())
            .field("locks", &self.locks.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use herd_application::ports::registry::{
    BACKEND_PROVIDERS, BackendProviderConfig, BackendProviderEntry,
};

#[linkme::distributed_slice(BACKEND_PROVIDERS)]
static MOKA_BACKEND: BackendProviderEntry = BackendProviderEntry {
    name: "moka",
    description: "Moka in-process backend (single node)",
    factory: |config: &BackendProviderConfig| {
        let backend = if let Some(max_capacity) = config.max_capacity {
            MokaBackend::with_capacity(max_capacity)
        } else {
            MokaBackend::new()
        };
        Ok(Arc::new(backend))
    },
};
