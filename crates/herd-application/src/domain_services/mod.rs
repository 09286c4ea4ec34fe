//! Domain Service Interfaces
//!
//! Object-safe interfaces over the cache services, for callers that hold
//! the cache behind `Arc<dyn ...>`.

pub mod invalidation;

pub use invalidation::CacheInvalidationInterface;
