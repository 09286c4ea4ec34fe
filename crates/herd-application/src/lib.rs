//! Application Layer - herd
//!
//! Orchestrates the cache-aside protocol on top of the domain ports.
//!
//! ## Use Cases
//!
//! - [`use_cases::CacheAsideService`]: read-check, lock, re-check, produce,
//!   populate, release, with degraded-path fallbacks
//! - [`use_cases::LockCoordinator`]: acquire/verify/release of a distributed mutex
//! - Invalidation: single key and pattern-based removal
//!
//! ## Ports
//!
//! - `ports::registry::*`: linkme registry through which backends self-register
//! - `domain_services::*`: object-safe service interfaces
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `herd-domain`: For ports, value objects and errors
//! - Pure Rust libraries for async, cancellation and logging

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
