//! Domain constants
//!
//! Defaults for the cache-aside protocol. Infrastructure configuration
//! falls back to these values when a setting is not provided.

// ============================================================================
// EXPIRY CONSTANTS
// ============================================================================

/// Default TTL for cache entries (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

// ============================================================================
// LOCK CONSTANTS
// ============================================================================

/// Default lock TTL in milliseconds. Only needs to outlive one production call.
pub const DEFAULT_LOCK_TTL_MS: u64 = 30_000;

/// Default delay between polls while another caller holds the lock
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default number of polls before a non-owner produces the value itself
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 50;

/// Suffix appended to a full key to form its lock key
pub const LOCK_KEY_SUFFIX: &str = ":lock";

// ============================================================================
// KEY CONSTANTS
// ============================================================================

/// Default namespace for cache keys
pub const DEFAULT_NAMESPACE: &str = "herd";

/// Separator between namespace and logical key
pub const NAMESPACE_SEPARATOR: &str = ":";
