//! Domain Value Objects
//!
//! Immutable value objects for the cache-aside protocol.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`KeyNamespace`] | Prefix shared by every key one engine issues |
//! | [`LockToken`] | Opaque owner token for a lock entry |
//! | [`ExpiryPolicy`] | Operation name to TTL lookup with a default |
//! | [`StampedeSettings`] | Lock TTL and polling parameters |
//! | [`CacheStats`] | Snapshot of engine counters |

/// Expiry policy
pub mod expiry;
/// Key namespacing
pub mod keys;
/// Lock owner tokens
pub mod lock;
/// Stampede protection settings
pub mod settings;
/// Cache statistics
pub mod stats;

pub use expiry::ExpiryPolicy;
pub use keys::KeyNamespace;
pub use lock::LockToken;
pub use settings::StampedeSettings;
pub use stats::CacheStats;
