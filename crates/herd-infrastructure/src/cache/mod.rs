//! Cache wiring
//!
//! Builds a ready-to-use engine from configuration. Backend implementations
//! are in the herd-providers crate and are looked up through the registry.

pub mod factory;

pub use factory::{CacheFactory, JsonCache};
