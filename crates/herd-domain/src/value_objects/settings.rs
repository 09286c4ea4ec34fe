//! Stampede protection settings

use crate::constants::{DEFAULT_LOCK_TTL_MS, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lock and polling parameters for the cache-aside engine
///
/// The lock TTL is independent of any cache TTL. Non-owners wait at most
/// `poll_interval * max_poll_attempts` before producing the value themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampedeSettings {
    /// Lifetime of a lock entry that is never released
    pub lock_ttl: Duration,
    /// Delay between reads while another caller holds the lock
    pub poll_interval: Duration,
    /// Reads attempted before giving up on the lock holder
    pub max_poll_attempts: u32,
}

impl StampedeSettings {
    /// Create settings from explicit values
    pub fn new(lock_ttl: Duration, poll_interval: Duration, max_poll_attempts: u32) -> Self {
        Self {
            lock_ttl,
            poll_interval,
            max_poll_attempts,
        }
    }

    /// Set the lock TTL
    pub fn with_lock_ttl(mut self, lock_ttl: Duration) -> Self {
        self.lock_ttl = lock_ttl;
        self
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the maximum number of poll attempts
    pub fn with_max_poll_attempts(mut self, max_poll_attempts: u32) -> Self {
        self.max_poll_attempts = max_poll_attempts;
        self
    }

    /// Upper bound on the time a non-owner spends polling
    pub fn max_wait(&self) -> Duration {
        self.poll_interval.saturating_mul(self.max_poll_attempts)
    }
}

impl Default for StampedeSettings {
    fn default() -> Self {
        Self {
            lock_ttl: Duration::from_millis(DEFAULT_LOCK_TTL_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}
