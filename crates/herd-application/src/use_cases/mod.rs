//! Use Cases
//!
//! | Use Case | Description |
//! |----------|-------------|
//! | [`CacheAsideService`] | Stampede-protected read-through cache |
//! | [`LockCoordinator`] | Distributed mutex over the key-value backend |

pub mod cache_aside;
pub mod lock_coordinator;

pub use cache_aside::CacheAsideService;
pub use lock_coordinator::{LockCoordinator, LockLease};
