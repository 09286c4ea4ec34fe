//! Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`KeyValueBackend`] | Shared store with expiry, set-if-absent and compare-and-delete |
//! | [`ValueCodec`] | Typed value encoding to and from bytes |

/// Key-value backend port
pub mod backend;
/// Value codec port
pub mod codec;

pub use backend::KeyValueBackend;
pub use codec::ValueCodec;
