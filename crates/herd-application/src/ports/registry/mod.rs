//! Provider Registries
//!
//! Providers register themselves at link time via `linkme` distributed
//! slices and are resolved by name from configuration.

/// Key-value backend registry
pub mod backend;

pub use backend::{
    BACKEND_PROVIDERS, BackendProviderConfig, BackendProviderEntry, list_backend_providers,
    resolve_backend_provider,
};
