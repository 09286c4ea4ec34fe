//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the application and domain layers.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Engine factory wiring configuration to a registered backend |
//! | [`config`] | Figment configuration: defaults, TOML file, `HERD_` environment |
//! | [`constants`] | Infrastructure constants |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`logging`] | Structured logging with tracing |

// Force linkme registration of all backends
extern crate herd_providers;

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use cache::{CacheFactory, JsonCache};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
