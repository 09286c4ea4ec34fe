//! Distributed Lock Coordinator
//!
//! Mutual exclusion coordinated through the key-value backend.
//!
//! ## State machine (per lock key)
//!
//! ```text
//! Unlocked --try_acquire--> Locked(token) --release(token)--> Unlocked
//!                               |
//!                               +------ TTL expiry (backend) --> Unlocked
//! ```
//!
//! Acquire is a single set-if-absent round-trip. Release is a server-side
//! compare-and-delete, so a holder whose lock already expired and was taken
//! over cannot delete the new holder's entry.

use herd_domain::error::{Error, Result};
use herd_domain::ports::KeyValueBackend;
use herd_domain::value_objects::LockToken;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Distributed lock coordinator
///
/// Never reports errors: a backend failure on acquire counts as "not
/// acquired", and a failure on release is logged and left to the lock TTL.
#[derive(Clone)]
pub struct LockCoordinator {
    backend: Arc<dyn KeyValueBackend>,
}

impl LockCoordinator {
    /// Create a coordinator over a shared backend
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Try to create the lock entry for `lock_key` owned by `token`
    ///
    /// # Returns
    /// True if this call created the entry; false on contention or backend error
    pub async fn try_acquire(&self, lock_key: &str, token: &LockToken, ttl: Duration) -> bool {
        match self
            .backend
            .set_if_absent_with_expiry(lock_key, token.as_bytes(), ttl)
            .await
        {
            Ok(true) => {
                debug!(lock_key = %lock_key, ttl = ?ttl, "lock acquired");
                true
            }
            Ok(false) => {
                debug!(lock_key = %lock_key, "lock held by another owner");
                false
            }
            Err(e) => {
                warn!(lock_key = %lock_key, error = %e, "lock acquire failed, treating as contended");
                false
            }
        }
    }

    /// Delete the lock entry only if it is still owned by `token`
    ///
    /// # Returns
    /// True if the entry was removed; false if it had expired, belonged to
    /// another owner, or the backend failed
    pub async fn release(&self, lock_key: &str, token: &LockToken) -> bool {
        match self
            .backend
            .compare_and_delete(lock_key, token.as_bytes())
            .await
        {
            Ok(true) => {
                debug!(lock_key = %lock_key, "lock released");
                true
            }
            Ok(false) => {
                warn!(
                    lock_key = %lock_key,
                    "lock release was a no-op: entry expired or now owned by another caller"
                );
                false
            }
            Err(e) => {
                warn!(lock_key = %lock_key, error = %e, "lock release failed, entry will expire by TTL");
                false
            }
        }
    }

    /// Acquire `lock_key` with a freshly generated token
    ///
    /// # Returns
    /// A lease that releases the lock when asked, or on drop as a fallback
    pub async fn acquire(&self, lock_key: &str, ttl: Duration) -> Option<LockLease> {
        let token = LockToken::generate();
        if self.try_acquire(lock_key, &token, ttl).await {
            Some(self.lease(lock_key, token))
        } else {
            None
        }
    }

    /// Acquire `lock_key`, giving up as soon as `cancel` fires
    ///
    /// The set-if-absent runs as its own task. If this call stops waiting
    /// for it, through `cancel` or by being dropped, the task is left to
    /// finish and a follow-up releases the lock if it landed.
    ///
    /// # Errors
    /// [`Error::Cancelled`] if `cancel` fires before the backend answers
    pub async fn acquire_with_cancel(
        &self,
        lock_key: &str,
        ttl: Duration,
        cancel: &CancellationToken,
    ) -> Result<Option<LockLease>> {
        let token = LockToken::generate();
        let mut pending = PendingAcquire::spawn(self.clone(), lock_key, token.clone(), ttl);

        let acquired = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            acquired = pending.join() => acquired,
        };

        Ok(acquired.then(|| self.lease(lock_key, token)))
    }

    fn lease(&self, lock_key: &str, token: LockToken) -> LockLease {
        LockLease {
            coordinator: self.clone(),
            key: lock_key.to_string(),
            token,
            released: false,
        }
    }
}

impl fmt::Debug for LockCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockCoordinator")
            .field("backend", &self.backend.provider_name())
            .finish()
    }
}

/// An acquire round-trip running on its own task
///
/// Dropped before [`PendingAcquire::join`] completes, it releases whatever
/// the task acquires.
struct PendingAcquire {
    attempt: Option<JoinHandle<bool>>,
    coordinator: LockCoordinator,
    key: String,
    token: LockToken,
}

impl PendingAcquire {
    fn spawn(coordinator: LockCoordinator, lock_key: &str, token: LockToken, ttl: Duration) -> Self {
        let attempt = {
            let coordinator = coordinator.clone();
            let key = lock_key.to_string();
            let token = token.clone();
            tokio::spawn(async move { coordinator.try_acquire(&key, &token, ttl).await })
        };
        Self {
            attempt: Some(attempt),
            coordinator,
            key: lock_key.to_string(),
            token,
        }
    }

    async fn join(&mut self) -> bool {
        let Some(attempt) = self.attempt.as_mut() else {
            return false;
        };
        let joined = attempt.await;
        self.attempt = None;
        joined.unwrap_or_else(|e| {
            warn!(lock_key = %self.key, error = %e, "lock acquire task failed, treating as contended");
            false
        })
    }
}

impl Drop for PendingAcquire {
    fn drop(&mut self) {
        let Some(attempt) = self.attempt.take() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let coordinator = self.coordinator.clone();
        let key = std::mem::take(&mut self.key);
        let token = self.token.clone();
        handle.spawn(async move {
            if let Ok(true) = attempt.await {
                debug!(lock_key = %key, "releasing lock acquired after the caller stopped waiting");
                coordinator.release(&key, &token).await;
            }
        });
    }
}

/// A held lock
///
/// Call [`LockLease::release`] on every path. If the lease is dropped
/// without being released (the owning future was dropped mid-flight), a
/// release is spawned on the current Tokio runtime.
#[derive(Debug)]
pub struct LockLease {
    coordinator: LockCoordinator,
    key: String,
    token: LockToken,
    released: bool,
}

impl LockLease {
    /// The lock key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The owner token
    pub fn token(&self) -> &LockToken {
        &self.token
    }

    /// Release the lock
    ///
    /// # Returns
    /// True if the entry was still ours and was removed
    pub async fn release(mut self) -> bool {
        let removed = self.coordinator.release(&self.key, &self.token).await;
        self.released = true;
        removed
    }
}

impl Drop for LockLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(lock_key = %self.key, "lease dropped outside a runtime, lock will expire by TTL");
            return;
        };
        let coordinator = self.coordinator.clone();
        let key = std::mem::take(&mut self.key);
        let token = self.token.clone();
        debug!(lock_key = %key, "lease dropped unreleased, releasing in background");
        handle.spawn(async move {
            coordinator.release(&key, &token).await;
        });
    }
}
