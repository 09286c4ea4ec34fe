//! Domain Port Interfaces
//!
//! Boundary contracts between the cache-aside core and the outside world.
//! Providers (Redis, Moka, Null, JSON codec) live in `herd-providers` and
//! implement these traits.
//!
//! ## Organization
//!
//! - **providers/** - External collaborators: the key-value backend and the value codec

/// External service provider ports
pub mod providers;

pub use providers::{KeyValueBackend, ValueCodec};
