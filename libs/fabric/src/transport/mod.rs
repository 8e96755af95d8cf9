use async_trait::async_trait;

use lodestar_core::{ModuleAddress, Result};

use crate::endpoint::Endpoint;

pub mod tcp;

pub use self::tcp::{TcpConductor, TcpConductorBuilder};

/// Transport collaborator: carries one serialized call to a conductor
/// endpoint and returns the serialized result.
///
/// Implementations surface [`lodestar_core::Error::Transport`] for
/// connection, timeout and framing faults, and
/// [`lodestar_core::Error::Remote`] when the module function itself
/// reported failure. Each invocation is one independent logical call;
/// implementations hold no per-call mutable state, so concurrent
/// invocations never interfere. Cancellation and retry policy live here or
/// with the caller, never in the dispatch layer above.
#[async_trait]
pub trait ConductorTransport: Send + Sync {
    async fn call(
        &self,
        endpoint: &Endpoint,
        module: &ModuleAddress,
        capability: &str,
        function: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>>;
}
