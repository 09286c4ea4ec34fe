//! JSON value codec

use herd_domain::error::{Error, Result};
use herd_domain::ports::ValueCodec;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// JSON codec backed by serde_json
///
/// The default codec. Stored values are human-readable, which keeps
/// entries inspectable with `redis-cli`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ValueCodec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| {
            Error::codec_with_source(format!("Failed to serialize value for cache: {e}"), e)
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| {
            Error::codec_with_source(format!("Failed to deserialize cached value: {e}"), e)
        })
    }

    fn name(&self) -> &str {
        "json"
    }
}
