use serde::{Deserialize, Serialize};

use lodestar_core::{Error, Result};

use crate::codec::Codec;

/// Bincode codec for compact binary serialization
///
/// Used for the wire envelope; zome payloads default to [`super::JsonCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn decode<T: for<'de> Deserialize<'de>>(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}
