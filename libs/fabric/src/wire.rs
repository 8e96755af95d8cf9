//! Wire envelope and framing
//!
//! One logical call is one request frame followed by one response frame.
//! Frames carry a 4-byte big-endian length prefix; envelope bodies are
//! bincode. Shared by the TCP conductor client and by test stubs standing
//! in for a conductor.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use lodestar_core::{Error, Result};

use crate::codec::{BincodeCodec, Codec};

/// Upper bound on a single frame body.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Request half of one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEnvelope {
    /// Raw module address bytes; the conductor routes on these.
    pub module: Vec<u8>,
    pub capability: String,
    pub function: String,
    /// Codec-encoded parameter object, opaque at this layer.
    pub payload: Vec<u8>,
}

/// Response half of one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallOutcome {
    /// Codec-encoded result object.
    Success(Vec<u8>),
    /// The module function itself reported failure.
    Failure(String),
}

impl CallEnvelope {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        BincodeCodec.encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        BincodeCodec.decode(bytes)
    }
}

impl CallOutcome {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        BincodeCodec.encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        BincodeCodec.decode(bytes)
    }
}

/// Write one length-prefixed frame
pub async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    if bytes.len() > MAX_FRAME_LEN {
        return Err(Error::Transport(format!(
            "frame too large: {} bytes",
            bytes.len()
        )));
    }
    writer
        .write_u32(bytes.len() as u32)
        .await
        .map_err(as_transport)?;
    writer.write_all(bytes).await.map_err(as_transport)?;
    writer.flush().await.map_err(as_transport)?;
    Ok(())
}

/// Read one length-prefixed frame
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>> {
    let len = reader.read_u32().await.map_err(as_transport)? as usize;
    if len > MAX_FRAME_LEN {
        return Err(Error::Transport(format!("frame too large: {len} bytes")));
    }
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await.map_err(as_transport)?;
    Ok(buf)
}

fn as_transport(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::Transport("connection closed".to_string())
    } else {
        Error::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_roundtrip() {
        let envelope = CallEnvelope {
            module: vec![1, 2, 3],
            capability: "agent".into(),
            function: "get_agent".into(),
            payload: b"{}".to_vec(),
        };
        let bytes = envelope.to_bytes().unwrap();
        assert_eq!(CallEnvelope::from_bytes(&bytes).unwrap(), envelope);
    }

    #[tokio::test]
    async fn frames_preserve_boundaries() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        write_frame(&mut client, b"first").await.unwrap();
        write_frame(&mut client, b"second").await.unwrap();
        assert_eq!(read_frame(&mut server).await.unwrap(), b"first");
        assert_eq!(read_frame(&mut server).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn closed_stream_is_transport_error() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);
        let err = read_frame(&mut server).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
