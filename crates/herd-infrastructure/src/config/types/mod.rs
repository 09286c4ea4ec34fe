//! Configuration types module

pub mod app;
pub mod backend;
pub mod cache;
pub mod logging;

// Re-export main types
pub use app::AppConfig;
pub use backend::BackendConfig;
pub use cache::CacheConfig;
pub use logging::LoggingConfig;
