//! Lodestar Fabric - RPC dispatch layer
//!
//! Binds logical (capability, function) pairs to typed, reusable RPC calls
//! against a conductor endpoint. Binding is pure and happens once at
//! startup; invocation serializes the parameter, hands it to a
//! [`transport::ConductorTransport`], and decodes the result.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lodestar_core::{ModuleRegistry, RegistryConfig};
//! use lodestar_fabric::{Dispatcher, Endpoint, transport::TcpConductor};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize)]
//! struct Params { name: String }
//!
//! #[derive(Deserialize)]
//! struct Reply { ok: bool }
//!
//! # async fn example(config: RegistryConfig) -> lodestar_core::Result<()> {
//! let registry = Arc::new(ModuleRegistry::from_config(config, &["agent"])?);
//! let endpoint = Endpoint::parse("127.0.0.1:8888")?;
//! let dispatcher = Dispatcher::new(endpoint, registry, Arc::new(TcpConductor::new()));
//!
//! // Bound once, invoked many times, concurrently if needed.
//! let call = dispatcher.bind::<Params, Reply>("agent", "register")?;
//! let reply = call.invoke(&Params { name: "alice".into() }).await?;
//! # Ok(())
//! # }
//! ```

pub mod call;
pub mod codec;
pub mod dispatch;
pub mod endpoint;
pub mod transport;
pub mod wire;

// Re-exports for convenience
pub use call::RpcCall;
pub use dispatch::Dispatcher;
pub use endpoint::Endpoint;
pub use lodestar_core::{Error, Result};
