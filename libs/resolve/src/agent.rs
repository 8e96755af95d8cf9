//! Agent query resolvers
//!
//! Two fields backed by the "agent" capability: `myAgent` (the caller's
//! own agent record) and `agent` (lookup by global identifier). Both are
//! single-shot request/response transformations with no state between
//! invocations. Module-local addresses never leave this module un-encoded.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use lodestar_core::{Error, GlobalId, LocalAddress, ModuleAddress, ModuleRegistry, Result};
use lodestar_fabric::codec::Codec;
use lodestar_fabric::{Dispatcher, RpcCall};

use crate::resolver::FieldResolver;

/// Capability name the agent module is registered under.
pub const AGENT_CAPABILITY: &str = "agent";

const FN_GET_MY_AGENT: &str = "get_my_agent";
const FN_GET_AGENT: &str = "get_agent";

/// Agent record as the module returns it: module-local id, never exposed
/// to callers in this form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: LocalAddress,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// `get_agent` nests its record one level down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent: Option<AgentRecord>,
}

/// Parameter shape for address-keyed lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ByAddress {
    pub address: LocalAddress,
}

#[derive(Debug, Deserialize)]
struct AgentArgs {
    id: GlobalId,
}

/// Externally visible agent shape: global identifier, same data fields.
#[derive(Debug, Serialize)]
struct AgentView {
    id: GlobalId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

fn view(record: AgentRecord, module: &ModuleAddress) -> Result<Value> {
    serde_json::to_value(AgentView {
        id: GlobalId::encode(module, &record.id),
        name: record.name,
        note: record.note,
    })
    .map_err(|e| Error::Serialization(e.to_string()))
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| Error::Serialization(format!("field arguments: {e}")))
}

/// `myAgent` — the caller's own agent record.
///
/// Zero arguments, so nothing to validate. The conductor knows who is
/// calling; the module returns a flat record whose local id is re-encoded
/// against the agent capability's primary module.
pub struct MyAgentResolver<C: Codec = lodestar_fabric::codec::JsonCodec> {
    call: RpcCall<(), AgentRecord, C>,
    module: ModuleAddress,
}

impl<C: Codec + Clone> MyAgentResolver<C> {
    pub fn bind(dispatcher: &Dispatcher<C>) -> Result<Self> {
        let module = dispatcher.registry().primary_address(AGENT_CAPABILITY)?.clone();
        Ok(Self {
            call: dispatcher.bind(AGENT_CAPABILITY, FN_GET_MY_AGENT)?,
            module,
        })
    }
}

#[async_trait]
impl<C: Codec + Clone> FieldResolver for MyAgentResolver<C> {
    async fn resolve(&self, _root: &Value, _args: Value) -> Result<Value> {
        let record = self.call.invoke(&()).await?;
        view(record, &self.module)
    }
}

/// `agent` — lookup by global identifier.
///
/// Decodes the identifier before any RPC activity: a malformed or
/// foreign-module id is rejected without a transport call. A well-formed
/// id whose record no longer exists resolves to [`Error::NotFound`].
pub struct AgentResolver<C: Codec = lodestar_fabric::codec::JsonCodec> {
    call: RpcCall<ByAddress, AgentResponse, C>,
    registry: Arc<ModuleRegistry>,
}

impl<C: Codec + Clone> AgentResolver<C> {
    pub fn bind(dispatcher: &Dispatcher<C>, registry: Arc<ModuleRegistry>) -> Result<Self> {
        Ok(Self {
            call: dispatcher.bind(AGENT_CAPABILITY, FN_GET_AGENT)?,
            registry,
        })
    }
}

#[async_trait]
impl<C: Codec + Clone> FieldResolver for AgentResolver<C> {
    async fn resolve(&self, _root: &Value, args: Value) -> Result<Value> {
        let args: AgentArgs = parse_args(args)?;
        let (module, local) = GlobalId::decode(args.id.as_str())?;
        if !self.registry.contains_module(&module) {
            return Err(Error::malformed(format!(
                "identifier references a module outside this deployment: {module}"
            )));
        }
        debug!(id = %args.id, "resolving agent");

        let response = self.call.invoke(&ByAddress { address: local }).await?;
        let record = response
            .agent
            .ok_or_else(|| Error::NotFound(format!("agent {}", args.id)))?;
        view(record, &module)
    }
}
