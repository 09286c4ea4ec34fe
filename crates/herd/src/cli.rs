//! Operator commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `peek <key>` | Print the stored value without touching it, or `(absent)` |
//! | `remove <key>` | Delete one entry |
//! | `purge <pattern>` | Delete every entry matching a glob pattern |
//! | `providers` | List registered backends |
//! | `ping` | Check that the configured backend answers |

use crate::infrastructure::config::{AppConfig, ConfigLoader};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::{CacheFactory, JsonCache};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use herd_application::ports::registry::list_backend_providers;
use std::io::Write;
use std::path::PathBuf;

/// Command line interface for herd
#[derive(Parser, Debug)]
#[command(name = "herd")]
#[command(about = "herd - Inspect and invalidate a stampede-protected cache")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operator subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the stored value for a key (read-only)
    Peek {
        /// Logical key, without the namespace prefix
        key: String,
    },
    /// Delete the entry for a key
    Remove {
        /// Logical key, without the namespace prefix
        key: String,
    },
    /// Delete every entry matching a glob pattern (lock entries are kept)
    Purge {
        /// Glob pattern over logical keys, e.g. `user:*`
        pattern: String,
    },
    /// List registered backend providers
    Providers,
    /// Check that the configured backend is reachable
    Ping,
}

/// Load configuration, install logging, and run one command against stdout
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config: AppConfig = loader.load().context("loading configuration")?;
    init_logging(&config.logging).context("initializing logging")?;

    let cache = CacheFactory::create(&config).context("creating cache engine")?;
    let stdout = std::io::stdout();
    execute(&cli.command, &cache, &mut stdout.lock()).await
}

/// Run one command against an engine, writing results to `out`
pub async fn execute<W: Write>(
    command: &Command,
    cache: &JsonCache,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Peek { key } => {
            let full_key = cache.namespace().full_key(key);
            let stored = cache
                .backend()
                .get(&full_key)
                .await
                .with_context(|| format!("reading '{full_key}'"))?;
            match stored {
                Some(bytes) => writeln!(out, "{}", render_stored(&bytes)?)?,
                None => writeln!(out, "(absent)")?,
            }
        }
        Command::Remove { key } => {
            let removed = cache.remove(key).await;
            writeln!(out, "{}", if removed { "removed" } else { "not found" })?;
        }
        Command::Purge { pattern } => {
            let removed = cache.remove_by_pattern(pattern).await;
            writeln!(out, "removed {removed} entries")?;
        }
        Command::Providers => {
            for (name, description) in list_backend_providers() {
                writeln!(out, "{name:<8} {description}")?;
            }
        }
        Command::Ping => {
            let backend = cache.backend();
            if !cache.is_backend_available().await {
                bail!("backend '{}' is unreachable", backend.provider_name());
            }
            writeln!(out, "ok ({})", backend.provider_name())?;
        }
    }
    Ok(())
}

/// Pretty JSON when the bytes parse, the raw text otherwise
fn render_stored(bytes: &[u8]) -> anyhow::Result<String> {
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(value) => Ok(serde_json::to_string_pretty(&value)?),
        Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}
