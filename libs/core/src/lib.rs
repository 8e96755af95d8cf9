//! Lodestar Core - identifiers, registry and error taxonomy
//!
//! The pure, I/O-free half of the bridge: the global identifier codec
//! (module address + module-local address ↔ external string id) and the
//! read-only module registry resolved once at startup.
//!
//! # Example
//!
//! ```
//! use lodestar_core::identifier::{GlobalId, LocalAddress, ModuleAddress};
//!
//! # fn example() -> lodestar_core::Result<()> {
//! let module = ModuleAddress::from_bytes(&[7u8; ModuleAddress::LEN])?;
//! let local = LocalAddress::from_bytes(b"entry-1")?;
//!
//! let id = GlobalId::encode(&module, &local);
//! let (m, l) = GlobalId::decode(id.as_str())?;
//! assert_eq!((m, l), (module, local));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod identifier;
pub mod registry;

// Re-exports for convenience
pub use error::{Error, Result};
pub use identifier::{GlobalId, LocalAddress, ModuleAddress};
pub use registry::{ModuleRegistry, RegistryConfig};
