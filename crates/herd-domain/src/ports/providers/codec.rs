//! Value Codec Port
//!
//! Encodes typed values to bytes and back. The codec is chosen per
//! deployment; JSON is the default.

use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Value Codec Port
///
/// Generic over the value type, so the engine is parameterised by a concrete
/// codec rather than holding a trait object.
pub trait ValueCodec: Send + Sync + Clone + std::fmt::Debug + 'static {
    /// Encode a value into bytes
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes into a value
    ///
    /// Any failure must be reported as [`crate::error::Error::Codec`]; the
    /// engine treats it as a corrupt entry.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Get the name of this codec (e.g., "json")
    fn name(&self) -> &str;
}
