use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use lodestar_core::{ModuleAddress, Result};

use crate::codec::{Codec, JsonCodec};
use crate::endpoint::Endpoint;
use crate::transport::ConductorTransport;

/// A bound, typed RPC call
///
/// Fixes (endpoint, module, capability, function) at construction time, so
/// per-request work is only serialize → transport → deserialize. Stateless
/// after construction: invoke it repeatedly and concurrently from any
/// number of tasks.
pub struct RpcCall<P, R, C: Codec = JsonCodec> {
    endpoint: Endpoint,
    module: ModuleAddress,
    capability: String,
    function: String,
    transport: Arc<dyn ConductorTransport>,
    codec: C,
    _types: PhantomData<fn(&P) -> R>,
}

impl<P, R, C: Codec> RpcCall<P, R, C> {
    pub(crate) fn new(
        endpoint: Endpoint,
        module: ModuleAddress,
        capability: impl Into<String>,
        function: impl Into<String>,
        transport: Arc<dyn ConductorTransport>,
        codec: C,
    ) -> Self {
        Self {
            endpoint,
            module,
            capability: capability.into(),
            function: function.into(),
            transport,
            codec,
            _types: PhantomData,
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn module(&self) -> &ModuleAddress {
        &self.module
    }
}

impl<P, R, C> RpcCall<P, R, C>
where
    P: Serialize + Sync,
    R: DeserializeOwned,
    C: Codec,
{
    /// Serialize `params`, issue the call, decode the result.
    ///
    /// Fails with `Transport` (transient, caller may retry), `Remote` (the
    /// module function reported failure, surfaced verbatim) or
    /// `Serialization` (result shape mismatch, fatal to the call).
    pub async fn invoke(&self, params: &P) -> Result<R> {
        let payload = self.codec.encode(params)?;
        debug!(
            capability = %self.capability,
            function = %self.function,
            "invoking bound call"
        );
        let result = self
            .transport
            .call(
                &self.endpoint,
                &self.module,
                &self.capability,
                &self.function,
                &payload,
            )
            .await;
        match result {
            Ok(bytes) => self.codec.decode(&bytes),
            Err(e) => {
                warn!(
                    capability = %self.capability,
                    function = %self.function,
                    error = %e,
                    "bound call failed"
                );
                Err(e)
            }
        }
    }
}

impl<P, R, C: Codec> fmt::Debug for RpcCall<P, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcCall")
            .field("endpoint", &self.endpoint)
            .field("module", &self.module)
            .field("capability", &self.capability)
            .field("function", &self.function)
            .finish_non_exhaustive()
    }
}

impl<P, R, C: Codec + Clone> Clone for RpcCall<P, R, C> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint,
            module: self.module.clone(),
            capability: self.capability.clone(),
            function: self.function.clone(),
            transport: Arc::clone(&self.transport),
            codec: self.codec.clone(),
            _types: PhantomData,
        }
    }
}
