use std::sync::Arc;

use lodestar_core::{ModuleRegistry, Result};

use crate::call::RpcCall;
use crate::codec::{Codec, JsonCodec};
use crate::endpoint::Endpoint;
use crate::transport::ConductorTransport;

/// Binds (capability, function) pairs to typed calls against one endpoint.
///
/// Construction is pure; so is [`Dispatcher::bind`]. All lookup cost is
/// paid here, once, which is what lets the resolver layer be assembled
/// entirely from bound calls before serving begins. The registry and
/// transport are shared handles; a process may hold any number of
/// dispatchers against different endpoints.
pub struct Dispatcher<C: Codec + Clone = JsonCodec> {
    endpoint: Endpoint,
    registry: Arc<ModuleRegistry>,
    transport: Arc<dyn ConductorTransport>,
    codec: C,
}

impl Dispatcher<JsonCodec> {
    pub fn new(
        endpoint: Endpoint,
        registry: Arc<ModuleRegistry>,
        transport: Arc<dyn ConductorTransport>,
    ) -> Self {
        Self::with_codec(endpoint, registry, transport, JsonCodec)
    }
}

impl<C: Codec + Clone> Dispatcher<C> {
    pub fn with_codec(
        endpoint: Endpoint,
        registry: Arc<ModuleRegistry>,
        transport: Arc<dyn ConductorTransport>,
        codec: C,
    ) -> Self {
        Self {
            endpoint,
            registry,
            transport,
            codec,
        }
    }

    /// Bind a typed call to the capability's primary module.
    ///
    /// No network activity; fails only with
    /// [`lodestar_core::Error::UnknownCapability`] when the capability was
    /// never configured.
    pub fn bind<P, R>(&self, capability: &str, function: &str) -> Result<RpcCall<P, R, C>> {
        let module = self.registry.primary_address(capability)?.clone();
        Ok(RpcCall::new(
            self.endpoint,
            module,
            capability,
            function,
            Arc::clone(&self.transport),
            self.codec.clone(),
        ))
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }
}
