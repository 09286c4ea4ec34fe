//! # herd
//!
//! A read-through distributed cache with cache stampede protection.
//!
//! On a miss, only the caller that wins a short-lived distributed lock runs
//! the expensive production function; every other caller polls for the value
//! it writes. Backend outages degrade to calling the production function
//! directly instead of failing.
//!
//! ## Example
//!
//! ```ignore
//! use herd::infrastructure::{CacheFactory, ConfigLoader};
//!
//! let config = ConfigLoader::new().load()?;
//! let cache = CacheFactory::create(&config)?;
//!
//! let user: User = cache
//!     .get_or_add("user:42", "LoadUser", || async { repo.load(42).await })
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Ports, value objects and the error type
//! - `application` - Cache-aside engine, lock coordinator, backend registry
//! - `providers` - Redis, Moka and Null backends, JSON codec
//! - `infrastructure` - Configuration, logging and engine factory

/// Domain layer - ports, value objects and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use herd_domain::*;
}

/// Application layer - cache-aside engine and lock coordination
pub mod application {
    pub use herd_application::*;
}

/// Provider implementations - backends and codecs
pub mod providers {
    pub use herd_providers::*;
}

/// Infrastructure layer - config, logging and engine factory
pub mod infrastructure {
    pub use herd_infrastructure::*;
}

/// Operator command line
pub mod cli;

// Re-export commonly used types at the crate root
pub use domain::{Error, Result};
pub use herd_application::{CacheAsideService, CacheInvalidationInterface, LockCoordinator};
pub use herd_infrastructure::{CacheFactory, ConfigLoader, JsonCache};
