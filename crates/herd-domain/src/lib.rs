//! # herd Domain Layer
//!
//! Core types for a read-through distributed cache with stampede protection.
//! This crate performs no I/O; it defines the contracts the rest of the
//! workspace is built against.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`ports`] | Backend and codec traits |
//! | [`value_objects`] | Key namespace, lock token, expiry policy, settings, stats |
//! | [`constants`] | Protocol defaults |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{KeyValueBackend, ValueCodec};
pub use value_objects::{CacheStats, ExpiryPolicy, KeyNamespace, LockToken, StampedeSettings};
