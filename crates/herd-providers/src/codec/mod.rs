//! Value Codec Implementations

pub mod json;

pub use json::JsonCodec;
