//! Key-Value Backend Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullBackend`] | Disabled | Stores nothing, every read misses |
//! | [`MokaBackend`] | Local | In-process store, single node and tests |
//! | [`RedisBackend`] | Distributed | Shared store for multi-instance deployments |
//!
//! ## Provider Selection Guide
//!
//! - **Caching disabled**: Use `NullBackend`
//! - **Single Instance / Tests**: Use `MokaBackend`
//! - **Multi Instance**: Use `RedisBackend`; it is the only one that
//!   coordinates across processes

#[cfg(feature = "backend-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "backend-redis")]
pub mod redis;

#[cfg(feature = "backend-moka")]
pub use moka::MokaBackend;
pub use null::NullBackend;
#[cfg(feature = "backend-redis")]
pub use redis::RedisBackend;
