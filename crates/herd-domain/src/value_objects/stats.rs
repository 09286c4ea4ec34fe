//! Cache statistics

use serde::{Deserialize, Serialize};

/// Cache Operation Statistics
///
/// Snapshot of the engine's counters. Counters are per engine instance,
/// not shared across processes.
///
/// # Example
///
/// ```ignore
/// let stats = cache.stats();
/// println!("Hit rate: {:.1}%", stats.hit_rate * 100.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Reads served from the backend
    pub hits: u64,
    /// Reads that found nothing usable
    pub misses: u64,
    /// Values written back after production
    pub populations: u64,
    /// Values produced without caching because of backend trouble or lock timeout
    pub fallbacks: u64,
    /// Lock acquisitions lost to another caller
    pub lock_contentions: u64,
    /// Undecodable entries found and deleted
    pub corrupt_entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate from hits and misses
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}
