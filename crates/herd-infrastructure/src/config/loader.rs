//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values.
//!
//! Environment variables use a double underscore between nested keys, e.g.
//! `HERD_CACHE__DEFAULT_TTL_SECS=600` or `HERD_BACKEND__PROVIDER=redis`.

use crate::config::AppConfig;
use crate::config::types::{BackendConfig, CacheConfig, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use herd_application::ports::registry::list_backend_providers;
use herd_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or `herd.toml` if discovered)
    /// 3. Environment variables with prefix (e.g., `HERD_CACHE__NAMESPACE`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            // Explicit paths must exist
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .config_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }
        if let Some(home_dir) = dirs::home_dir() {
            candidates.push(
                home_dir
                    .join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME),
            );
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_cache_config(&config.cache)?;
    validate_backend_config(&config.backend)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if config.default_ttl_secs == 0 {
        return Err(Error::configuration("Default cache TTL cannot be 0"));
    }
    if let Some((operation, _)) = config.operation_ttls.iter().find(|(_, secs)| **secs == 0) {
        return Err(Error::configuration(format!(
            "TTL for operation '{operation}' cannot be 0"
        )));
    }
    if config.lock_ttl_ms == 0 {
        return Err(Error::configuration("Lock TTL cannot be 0"));
    }
    if config.poll_interval_ms == 0 {
        return Err(Error::configuration("Poll interval cannot be 0"));
    }
    if config.max_poll_attempts == 0 {
        return Err(Error::configuration("Maximum poll attempts cannot be 0"));
    }
    Ok(())
}

fn validate_backend_config(config: &BackendConfig) -> Result<()> {
    let available: Vec<&str> = list_backend_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    if !available.contains(&config.provider.as_str()) {
        return Err(Error::configuration(format!(
            "Unknown backend provider '{}'. Available providers: {available:?}",
            config.provider
        )));
    }
    if config.max_capacity == Some(0) {
        return Err(Error::configuration("Backend max_capacity cannot be 0"));
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set backend configuration
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Override the TTL for one operation
    pub fn with_operation_ttl<S: Into<String>>(mut self, operation: S, ttl_secs: u64) -> Self {
        self.config
            .cache
            .operation_ttls
            .insert(operation.into(), ttl_secs);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}
