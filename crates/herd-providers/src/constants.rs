//! Provider Constants
//!
//! Constants specific to provider implementations. Protocol defaults live in
//! `herd_domain::constants`.

// ============================================================================
// MOKA BACKEND CONSTANTS
// ============================================================================

/// Default maximum number of entries held by the Moka backend
pub const MOKA_DEFAULT_MAX_CAPACITY: u64 = 100_000;

// ============================================================================
// REDIS BACKEND CONSTANTS
// ============================================================================

/// Default Redis URL
pub const REDIS_DEFAULT_URI: &str = "redis://localhost:6379";

/// Keys requested per SCAN round-trip
pub const REDIS_SCAN_COUNT: usize = 500;

/// Delete the lock only if it still holds the caller's token
pub const REDIS_COMPARE_AND_DELETE_SCRIPT: &str = r"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
else
    return 0
end
";
