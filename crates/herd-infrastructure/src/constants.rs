//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Protocol defaults are defined in `herd_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "herd.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "herd";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "HERD";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// BACKEND CONSTANTS
// ============================================================================

/// Backend used when none is configured
pub const DEFAULT_BACKEND_PROVIDER: &str = "moka";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "HERD_LOG";
