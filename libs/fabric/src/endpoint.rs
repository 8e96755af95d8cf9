use std::fmt;
use std::net::SocketAddr;

use lodestar_core::{Error, Result};

/// Validated conductor endpoint.
///
/// Parsing happens once, at configuration time; everything downstream of a
/// constructed `Endpoint` can rely on it being well-formed, which is why
/// [`crate::Dispatcher::bind`] never touches the network and cannot fail on
/// endpoint grounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint(SocketAddr);

impl Endpoint {
    /// Parse a `host:port` string.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
            .map(Self)
            .map_err(|e| Error::configuration(format!("invalid endpoint '{s}': {e}")))
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
