//! Application Ports
//!
//! - **registry/** - Auto-registration of backend providers

/// Provider registries
pub mod registry;
