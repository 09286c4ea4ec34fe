//! Configuration management
//!
//! Layered configuration through Figment: built-in defaults, then a TOML
//! file, then `HERD_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, BackendConfig, CacheConfig, LoggingConfig};
