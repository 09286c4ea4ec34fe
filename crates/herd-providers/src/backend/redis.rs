//! Redis distributed backend
//!
//! Shared-store backend for multi-instance deployments. Every engine pointed
//! at the same Redis database takes part in the same stampede protection.
//!
//! ## Features
//!
//! - Lock acquire as a single `SET key token NX PX ttl`
//! - Owner-safe lock release through a compare-and-delete Lua script
//! - Cursor-based `SCAN` for pattern removal (never `KEYS`)
//! - One auto-reconnecting connection manager shared by all clones
//!
//! ## Example
//!
//! ```ignore
//! use herd_providers::backend::RedisBackend;
//!
//! let backend = RedisBackend::new("redis://localhost:6379")?;
//! // Or with host/port
//! let backend = RedisBackend::with_host_port("localhost", 6379)?;
//! ```

use crate::constants::{REDIS_COMPARE_AND_DELETE_SCRIPT, REDIS_DEFAULT_URI, REDIS_SCAN_COUNT};
use async_trait::async_trait;
use herd_domain::error::{Error, Result};
use herd_domain::ports::KeyValueBackend;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError, Script};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Redis backend
///
/// The connection manager is created on first use, so constructing a
/// backend never touches the network.
#[derive(Clone)]
pub struct RedisBackend {
    client: Client,
    connection: Arc<OnceCell<ConnectionManager>>,
    release_script: Arc<Script>,
    scan_count: usize,
}

fn redis_error(op: &str, e: RedisError) -> Error {
    Error::backend_with_source(format!("Redis {op} failed: {e}"), e)
}

/// Redis rejects a zero PX argument
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

impl RedisBackend {
    /// Create a new Redis backend with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::backend_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        Ok(Self {
            client,
            connection: Arc::new(OnceCell::new()),
            release_script: Arc::new(Script::new(REDIS_COMPARE_AND_DELETE_SCRIPT)),
            scan_count: REDIS_SCAN_COUNT,
        })
    }

    /// Create a new Redis backend with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Override the per-round-trip SCAN hint
    pub fn with_scan_count(mut self, scan_count: usize) -> Self {
        self.scan_count = scan_count.max(1);
        self
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        self.connection
            .get_or_try_init(|| async {
                let manager = self
                    .client
                    .get_connection_manager()
                    .await
                    .map_err(|e| redis_error("connect", e))?;
                debug!("redis connection manager established");
                Ok::<_, Error>(manager)
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl KeyValueBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        redis::cmd("GET")
            .arg(key)
            .query_async::<Option<Vec<u8>>>(&mut conn)
            .await
            .map_err(|e| redis_error("GET", e))
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| redis_error("SET", e))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let deleted = redis::cmd("DEL")
            .arg(key)
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| redis_error("DEL", e))?;
        Ok(deleted > 0)
    }

    async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<bool> {
        let mut conn = self.connection().await?;
        // Nil reply means the key already exists
        let reply = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(|e| redis_error("SET NX", e))?;
        Ok(reply.is_some())
    }

    async fn compare_and_delete(&self, key: &str, expected: &[u8]) -> Result<bool> {
        let mut conn = self.connection().await?;
        let deleted = self
            .release_script
            .key(key)
            .arg(expected)
            .invoke_async::<i64>(&mut conn)
            .await
            .map_err(|e| redis_error("EVALSHA", e))?;
        Ok(deleted > 0)
    }

    async fn scan_keys_by_pattern(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(self.scan_count)
                .query_async::<(u64, Vec<String>)>(&mut conn)
                .await
                .map_err(|e| redis_error("SCAN", e))?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| redis_error("PING", e))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("connected", &self.connection.initialized())
            .field("scan_count", &self.scan_count)
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use herd_application::ports::registry::{
    BACKEND_PROVIDERS, BackendProviderConfig, BackendProviderEntry,
};

#[linkme::distributed_slice(BACKEND_PROVIDERS)]
static REDIS_BACKEND: BackendProviderEntry = BackendProviderEntry {
    name: "redis",
    description: "Redis distributed backend (multi node)",
    factory: |config: &BackendProviderConfig| {
        let uri = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URI);
        let mut backend = RedisBackend::new(uri).map_err(|e| e.to_string())?;
        if let Some(scan_count) = config.extra.get("scan_count") {
            let scan_count = scan_count
                .parse::<usize>()
                .map_err(|e| format!("Invalid redis scan_count '{scan_count}': {e}"))?;
            backend = backend.with_scan_count(scan_count);
        }
        Ok(Arc::new(backend))
    },
};
