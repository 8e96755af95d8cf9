//! Lodestar Resolve - GraphQL field resolvers over the RPC fabric
//!
//! Assembles the resolver set a GraphQL execution engine consumes. All
//! wiring is explicit dependency injection: a [`BridgeConfig`] holds the
//! endpoint, registry and transport, and [`build_resolvers`] binds every
//! RPC call up front. No module-level singletons, so independent bridges
//! (separate conductors, tests) coexist freely in one process.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lodestar_core::{ModuleRegistry, RegistryConfig};
//! use lodestar_fabric::{Endpoint, transport::TcpConductor};
//! use lodestar_resolve::{build_resolvers, BridgeConfig, FieldResolver, REQUIRED_CAPABILITIES};
//!
//! # async fn example(config: RegistryConfig) -> lodestar_core::Result<()> {
//! let bridge = BridgeConfig {
//!     endpoint: Endpoint::parse("127.0.0.1:8888")?,
//!     registry: Arc::new(ModuleRegistry::from_config(config, REQUIRED_CAPABILITIES)?),
//!     transport: Arc::new(TcpConductor::new()),
//! };
//! let resolvers = build_resolvers(&bridge)?;
//!
//! let my_agent = resolvers.get("myAgent").unwrap();
//! let agent = my_agent.resolve(&serde_json::Value::Null, serde_json::Value::Null).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use lodestar_core::{ModuleRegistry, Result};
use lodestar_fabric::transport::ConductorTransport;
use lodestar_fabric::{Dispatcher, Endpoint};

pub mod agent;
pub mod discriminant;
pub mod resolver;

pub use discriminant::{Tagged, TYPENAME_FIELD};
pub use resolver::{FieldResolver, ResolverMap};

use agent::{AgentResolver, MyAgentResolver, AGENT_CAPABILITY};

/// Capabilities the resolver set references; pass to
/// [`ModuleRegistry::from_config`] so a misconfigured deployment fails at
/// startup rather than at first use.
pub const REQUIRED_CAPABILITIES: &[&str] = &[AGENT_CAPABILITY];

/// Everything one bridge instance depends on, passed in explicitly.
#[derive(Clone)]
pub struct BridgeConfig {
    pub endpoint: Endpoint,
    pub registry: Arc<ModuleRegistry>,
    pub transport: Arc<dyn ConductorTransport>,
}

/// Bind every resolver against the configured conductor.
///
/// All capability lookups happen here; after this returns, resolution can
/// only fail per-request, never on wiring grounds. `agent` is wrapped with
/// a `"Person"` discriminant — a known simplification until the modules
/// report whether a record is a person or an organization.
pub fn build_resolvers(config: &BridgeConfig) -> Result<ResolverMap> {
    let dispatcher = Dispatcher::new(
        config.endpoint,
        Arc::clone(&config.registry),
        Arc::clone(&config.transport),
    );

    let mut map = ResolverMap::new();
    map.insert("myAgent", Arc::new(MyAgentResolver::bind(&dispatcher)?));
    map.insert(
        "agent",
        Arc::new(Tagged::new(
            "Person",
            AgentResolver::bind(&dispatcher, Arc::clone(&config.registry))?,
        )),
    );
    Ok(map)
}
