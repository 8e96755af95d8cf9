//! Global identifier codec
//!
//! Entities live inside independently deployed modules, each of which only
//! knows its own module-local binary addresses. Externally visible
//! identifiers must also say *which* module an address belongs to, so the
//! codec concatenates both halves into a single string:
//!
//! `base64url(module address) ":" base64url(local address)`
//!
//! The alphabet is URL-safe base64 without padding; `:` is not part of it,
//! so the encoding is injective and decoding is unambiguous. Module-local
//! addresses never cross the API boundary in any other form.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

const SEPARATOR: char = ':';

/// Opaque fixed-length binary address of one deployed module instance.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ModuleAddress([u8; Self::LEN]);

impl ModuleAddress {
    /// Byte length of every module address.
    pub const LEN: usize = 39;

    /// Build from raw bytes; the length must match exactly.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
            Error::malformed(format!(
                "module address must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Parse the base64url form used in configuration and identifiers.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| Error::malformed(format!("module address: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn encoded(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }
}

impl fmt::Display for ModuleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded())
    }
}

impl fmt::Debug for ModuleAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleAddress({})", self.encoded())
    }
}

impl Serialize for ModuleAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded())
    }
}

impl<'de> Deserialize<'de> for ModuleAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_encoded(&s).map_err(D::Error::custom)
    }
}

/// Opaque module-scoped binary address of one entry.
///
/// Meaningless outside the module that minted it; pair it with a
/// [`ModuleAddress`] via [`GlobalId::encode`] before handing it to callers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocalAddress(Vec<u8>);

impl LocalAddress {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::malformed("local address must not be empty"));
        }
        Ok(Self(bytes.to_vec()))
    }

    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| Error::malformed(format!("local address: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn encoded(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }
}

impl fmt::Display for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded())
    }
}

impl fmt::Debug for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalAddress({})", self.encoded())
    }
}

impl Serialize for LocalAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded())
    }
}

impl<'de> Deserialize<'de> for LocalAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_encoded(&s).map_err(D::Error::custom)
    }
}

/// Externally visible identifier carrying both halves of an address.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalId(String);

impl GlobalId {
    /// Encode a (module, local) pair. Total and deterministic; two distinct
    /// pairs never produce the same id.
    pub fn encode(module: &ModuleAddress, local: &LocalAddress) -> Self {
        Self(format!(
            "{}{}{}",
            module.encoded(),
            SEPARATOR,
            local.encoded()
        ))
    }

    /// Recover the exact (module, local) pair an id was encoded from.
    ///
    /// Fails with [`Error::MalformedIdentifier`] for any string this codec
    /// never produced. Whether the module half is known to the caller's
    /// registry is the caller's check, not the codec's.
    pub fn decode(id: &str) -> Result<(ModuleAddress, LocalAddress)> {
        let (module, local) = id
            .split_once(SEPARATOR)
            .ok_or_else(|| Error::malformed(format!("missing '{SEPARATOR}' separator: {id}")))?;
        Ok((
            ModuleAddress::from_encoded(module)?,
            LocalAddress::from_encoded(local)?,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlobalId({})", self.0)
    }
}
