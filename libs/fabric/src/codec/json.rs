use serde::{Deserialize, Serialize};

use lodestar_core::{Error, Result};

use crate::codec::Codec;

/// JSON codec for module call payloads
///
/// The default payload codec: module functions and the GraphQL surface both
/// speak field-named structures, and JSON keeps the two inspectable side by
/// side.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn decode<T: for<'de> Deserialize<'de>>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}
