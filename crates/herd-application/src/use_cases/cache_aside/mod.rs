//! Cache-Aside Engine
//!
//! Read-through cache with stampede protection. On a miss only the caller
//! that wins the distributed lock runs the production function; everyone
//! else polls the backend for the value it writes.
//!
//! ## Flow
//!
//! ```text
//! get_or_add(key)
//!   read ── hit ──────────────────────────────────────────────▶ value
//!    │ miss / corrupt (deleted)
//!    ▼
//!   try_acquire(key:lock)
//!    ├─ won ─▶ re-read ── hit ─▶ release ─────────────────────▶ value
//!    │           └ miss ─▶ produce ─▶ write (unless default) ─▶ release ─▶ value
//!    └─ lost ─▶ poll N × interval ── hit ─────────────────────▶ value
//!                 └ exhausted ─▶ produce (never written) ─────▶ value
//! ```
//!
//! ## Graceful Degradation
//!
//! Backend and codec failures never reach the caller. A failed read makes
//! the engine call `produce` directly and return its result uncached. Only
//! the production function's own errors and [`Error::Cancelled`] propagate.

mod invalidation;
mod stats;

use crate::use_cases::lock_coordinator::{LockCoordinator, LockLease};
use herd_domain::constants::DEFAULT_NAMESPACE;
use herd_domain::error::{Error, Result};
use herd_domain::ports::{KeyValueBackend, ValueCodec};
use herd_domain::value_objects::{CacheStats, ExpiryPolicy, KeyNamespace, StampedeSettings};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stats::StatsRecorder;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of one backend read
enum Lookup<T> {
    Hit(T),
    /// Absent, or present but undecodable (already deleted)
    Miss,
    /// Backend failed; the error has been logged
    Unavailable,
}

/// Run `fut` unless `cancel` fires first
async fn with_cancel<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        output = fut => Ok(output),
    }
}

/// Stampede-protected read-through cache
///
/// Cheap to clone; clones share the backend client and statistics.
/// There is no in-process locking: all coordination goes through the
/// backend, so calls for different keys never wait on each other.
///
/// # Example
///
/// ```ignore
/// use herd_application::CacheAsideService;
/// use herd_providers::{codec::JsonCodec, backend::MokaBackend};
/// use std::sync::Arc;
///
/// let cache = CacheAsideService::new(Arc::new(MokaBackend::new()), JsonCodec);
/// let user: User = cache
///     .get_or_add("user:42", "LoadUser", || async { repo.load(42).await })
///     .await?;
/// ```
#[derive(Clone)]
pub struct CacheAsideService<C: ValueCodec> {
    backend: Arc<dyn KeyValueBackend>,
    codec: C,
    namespace: KeyNamespace,
    expiry: Arc<ExpiryPolicy>,
    settings: StampedeSettings,
    locks: LockCoordinator,
    stats: Arc<StatsRecorder>,
}

// Construction and Configuration Methods
impl<C: ValueCodec> CacheAsideService<C> {
    /// Create an engine with the default namespace, expiry policy and settings
    pub fn new(backend: Arc<dyn KeyValueBackend>, codec: C) -> Self {
        Self {
            locks: LockCoordinator::new(Arc::clone(&backend)),
            backend,
            codec,
            namespace: KeyNamespace::new(DEFAULT_NAMESPACE),
            expiry: Arc::new(ExpiryPolicy::default()),
            settings: StampedeSettings::default(),
            stats: Arc::default(),
        }
    }

    /// Set the key namespace
    pub fn with_namespace(mut self, namespace: KeyNamespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Set the expiry policy
    pub fn with_expiry_policy(mut self, expiry: ExpiryPolicy) -> Self {
        self.expiry = Arc::new(expiry);
        self
    }

    /// Set the lock and polling parameters
    pub fn with_settings(mut self, settings: StampedeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The key namespace
    pub fn namespace(&self) -> &KeyNamespace {
        &self.namespace
    }

    /// The expiry policy
    pub fn expiry_policy(&self) -> &ExpiryPolicy {
        &self.expiry
    }

    /// The lock and polling parameters
    pub fn settings(&self) -> &StampedeSettings {
        &self.settings
    }

    /// The lock coordinator bound to this engine's backend
    pub fn lock_coordinator(&self) -> &LockCoordinator {
        &self.locks
    }

    /// The shared backend
    pub fn backend(&self) -> Arc<dyn KeyValueBackend> {
        Arc::clone(&self.backend)
    }

    /// Snapshot of this engine's counters
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Whether the backend currently answers a ping
    pub async fn is_backend_available(&self) -> bool {
        match self.backend.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(backend = self.backend.provider_name(), error = %e, "backend ping failed");
                false
            }
        }
    }
}

// Cache Operations Methods
impl<C: ValueCodec> CacheAsideService<C> {
    /// Return the cached value for `key`, producing and caching it on a miss
    ///
    /// See [`Self::get_or_add_with_cancel`].
    pub async fn get_or_add<T, F, Fut>(&self, key: &str, operation: &str, produce: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let cancel = CancellationToken::new();
        self.get_or_add_with_cancel(key, operation, &cancel, produce)
            .await
    }

    /// Return the cached value for `key`, producing and caching it on a miss
    ///
    /// `produce` runs at most once per call. Its result is written with the
    /// TTL the expiry policy resolves for `operation`, unless it equals
    /// `T::default()`, which is returned but never cached.
    ///
    /// Each call counts as exactly one hit or one miss, decided by the first
    /// read. A value found later, under the lock or while polling, does not
    /// turn the miss into a hit.
    ///
    /// # Errors
    ///
    /// Only errors returned by `produce` and [`Error::Cancelled`]. A lock
    /// held by this call is released before either is returned.
    pub async fn get_or_add_with_cancel<T, F, Fut>(
        &self,
        key: &str,
        operation: &str,
        cancel: &CancellationToken,
        produce: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let full_key = self.namespace.full_key(key);
        match self.lookup::<T>(&full_key, cancel).await? {
            Lookup::Hit(value) => {
                self.stats.record_hit();
                debug!(key = %full_key, "cache hit");
                return Ok(value);
            }
            Lookup::Unavailable => {
                self.stats.record_miss();
                return self.produce_uncached(&full_key, cancel, produce).await;
            }
            Lookup::Miss => {
                self.stats.record_miss();
                debug!(key = %full_key, "cache miss");
            }
        }

        let lock_key = self.namespace.lock_key(key);
        let lease = self
            .locks
            .acquire_with_cancel(&lock_key, self.settings.lock_ttl, cancel)
            .await?;
        match lease {
            Some(lease) => {
                self.populate_under_lock(&full_key, operation, lease, cancel, produce)
                    .await
            }
            None => {
                self.stats.record_contention();
                self.wait_for_holder(&full_key, cancel, produce).await
            }
        }
    }

    /// Read `key` without ever producing or locking
    ///
    /// Corrupt entries are deleted and reported as absent; backend failures
    /// are logged and reported as absent.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        let full_key = self.namespace.full_key(key);
        let cancel = CancellationToken::new();
        if let Ok(Lookup::Hit(value)) = self.lookup::<T>(&full_key, &cancel).await {
            self.stats.record_hit();
            debug!(key = %full_key, "cache hit");
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    /// Write `value` under `key` with the TTL for `operation`
    ///
    /// Unlike the read paths this is an explicit write, so codec and backend
    /// failures are returned to the caller.
    pub async fn set<T>(&self, key: &str, operation: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let full_key = self.namespace.full_key(key);
        let ttl = self.expiry.resolve(operation);
        let bytes = self.codec.encode(value)?;
        self.backend.set_with_expiry(&full_key, &bytes, ttl).await?;
        self.stats.record_population();
        debug!(key = %full_key, ttl_secs = ttl.as_secs(), "cache set");
        Ok(())
    }
}

// Protocol steps
impl<C: ValueCodec> CacheAsideService<C> {
    async fn lookup<T>(&self, full_key: &str, cancel: &CancellationToken) -> Result<Lookup<T>>
    where
        T: DeserializeOwned + Send,
    {
        match with_cancel(cancel, self.backend.get(full_key)).await? {
            Ok(Some(bytes)) => match self.codec.decode::<T>(&bytes) {
                Ok(value) => Ok(Lookup::Hit(value)),
                Err(e) => {
                    self.stats.record_corrupt();
                    warn!(key = %full_key, codec = self.codec.name(), error = %e, "corrupt cache entry, deleting");
                    if let Err(e) = with_cancel(cancel, self.backend.delete(full_key)).await? {
                        warn!(key = %full_key, error = %e, "failed to delete corrupt cache entry");
                    }
                    Ok(Lookup::Miss)
                }
            },
            Ok(None) => Ok(Lookup::Miss),
            Err(e) => {
                warn!(key = %full_key, error = %e, "cache read failed");
                Ok(Lookup::Unavailable)
            }
        }
    }

    /// Lock holder path. The lease is released on every exit, including
    /// produce failures and cancellation.
    async fn populate_under_lock<T, F, Fut>(
        &self,
        full_key: &str,
        operation: &str,
        lease: LockLease,
        cancel: &CancellationToken,
        produce: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let outcome = self
            .produce_and_store(full_key, operation, cancel, produce)
            .await;
        lease.release().await;
        if let Err(Error::Cancelled) = &outcome {
            debug!(key = %full_key, "cancelled while holding lock, lock released");
        }
        outcome
    }

    async fn produce_and_store<T, F, Fut>(
        &self,
        full_key: &str,
        operation: &str,
        cancel: &CancellationToken,
        produce: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        // Another holder may have populated between the first read and the acquire.
        match self.lookup::<T>(full_key, cancel).await? {
            Lookup::Hit(value) => {
                debug!(key = %full_key, "cache hit after lock acquire");
                return Ok(value);
            }
            Lookup::Unavailable => {
                return self.produce_uncached(full_key, cancel, produce).await;
            }
            Lookup::Miss => {}
        }

        let value = with_cancel(cancel, produce()).await??;
        if value == T::default() {
            debug!(key = %full_key, "produced default value, not caching");
            return Ok(value);
        }

        let ttl = self.expiry.resolve(operation);
        let encoded = self.codec.encode(&value);
        match encoded {
            Ok(bytes) => self.store(full_key, bytes, ttl, cancel).await?,
            Err(e) => {
                warn!(key = %full_key, codec = self.codec.name(), error = %e, "failed to encode value, not caching");
            }
        }
        Ok(value)
    }

    /// Best-effort write; only cancellation is reported
    async fn store(
        &self,
        full_key: &str,
        bytes: Vec<u8>,
        ttl: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        match with_cancel(cancel, self.backend.set_with_expiry(full_key, &bytes, ttl)).await? {
            Ok(()) => {
                self.stats.record_population();
                debug!(key = %full_key, ttl_secs = ttl.as_secs(), "cache populated");
            }
            Err(e) => {
                warn!(key = %full_key, error = %e, "cache write failed, returning uncached value");
            }
        }
        Ok(())
    }

    /// Non-owner path: wait for the holder's write, then give up and produce
    async fn wait_for_holder<T, F, Fut>(
        &self,
        full_key: &str,
        cancel: &CancellationToken,
        produce: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let max_attempts = self.settings.max_poll_attempts;
        for attempt in 1..=max_attempts {
            with_cancel(cancel, tokio::time::sleep(self.settings.poll_interval)).await?;
            match self.lookup::<T>(full_key, cancel).await? {
                Lookup::Hit(value) => {
                    debug!(key = %full_key, attempt, "cache hit while waiting for lock holder");
                    return Ok(value);
                }
                Lookup::Miss => {}
                Lookup::Unavailable => {
                    return self.produce_uncached(full_key, cancel, produce).await;
                }
            }
        }

        warn!(
            key = %full_key,
            attempts = max_attempts,
            "lock holder did not populate in time, producing uncached"
        );
        self.produce_uncached(full_key, cancel, produce).await
    }

    async fn produce_uncached<T, F, Fut>(
        &self,
        full_key: &str,
        cancel: &CancellationToken,
        produce: F,
    ) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        self.stats.record_fallback();
        debug!(key = %full_key, "producing value without caching");
        with_cancel(cancel, produce()).await?
    }
}

impl<C: ValueCodec> fmt::Debug for CacheAsideService<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheAsideService")
            .field("backend", &self.backend.provider_name())
            .field("codec", &self.codec.name())
            .field("namespace", &self.namespace.prefix())
            .field("settings", &self.settings)
            .finish()
    }
}
