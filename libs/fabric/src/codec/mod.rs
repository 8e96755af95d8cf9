use serde::{Deserialize, Serialize};

use lodestar_core::Result;

pub mod bincode;
pub mod json;

pub use self::bincode::BincodeCodec;
pub use self::json::JsonCodec;

/// Codec trait for serializing call parameters and deserializing results
///
/// Failures map to [`lodestar_core::Error::Serialization`]: a value that
/// does not round-trip through the codec is a contract mismatch, fatal to
/// the call that produced it.
pub trait Codec: Send + Sync {
    /// Encode a value into bytes
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes into a value
    fn decode<T: for<'de> Deserialize<'de>>(&self, bytes: &[u8]) -> Result<T>;
}
