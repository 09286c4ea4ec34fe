//! # herd - Provider Implementations
//!
//! Concrete adapters for the ports defined in `herd-domain`. Each backend
//! registers itself in the `herd-application` registry at link time.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Backend | `KeyValueBackend` | Redis, Moka, Null |
//! | Codec | `ValueCodec` | Json |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! herd-providers = { version = "0.1", default-features = false, features = ["backend-redis"] }
//! ```

// Re-export herd-domain types commonly used with providers
pub use herd_domain::error::{Error, Result};
pub use herd_domain::ports::{KeyValueBackend, ValueCodec};

/// Provider-specific constants
pub mod constants;

/// Key-value backend implementations
///
/// Implements `KeyValueBackend` for shared stores.
pub mod backend;

/// Value codec implementations
///
/// Implements `ValueCodec` for serialization formats.
pub mod codec;
