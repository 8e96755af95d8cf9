//! Module registry
//!
//! Maps logical capability names ("agent", "observation", ...) to the module
//! addresses deployed behind one conductor endpoint. Built once from static
//! configuration and read-only afterwards, so any number of concurrent
//! resolver invocations can share it without locking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identifier::ModuleAddress;

/// External configuration shape: capability name → ordered list of
/// base64url module address strings. Where it is loaded from (file,
/// environment, deployment tooling) is out of scope here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryConfig {
    pub capabilities: HashMap<String, Vec<String>>,
}

/// Read-only capability → module address mapping.
///
/// The first address of each capability is the "primary" instance used when
/// minting identifiers for records returned by that capability.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    capabilities: HashMap<String, Vec<ModuleAddress>>,
}

impl ModuleRegistry {
    /// Validate configuration into a registry.
    ///
    /// Fails with [`Error::Configuration`] when a required capability is
    /// missing or has an empty address list, or when any address string
    /// does not parse. Configuration failures are startup-fatal: callers
    /// must not begin serving without a registry.
    pub fn from_config(config: RegistryConfig, required: &[&str]) -> Result<Self> {
        let mut capabilities = HashMap::with_capacity(config.capabilities.len());
        for (name, encoded) in config.capabilities {
            if encoded.is_empty() {
                return Err(Error::configuration(format!(
                    "capability '{name}' has no module addresses"
                )));
            }
            let addresses = encoded
                .iter()
                .map(|s| {
                    ModuleAddress::from_encoded(s).map_err(|e| {
                        Error::configuration(format!("capability '{name}': {e}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            capabilities.insert(name, addresses);
        }
        for name in required {
            if !capabilities.contains_key(*name) {
                return Err(Error::configuration(format!(
                    "required capability '{name}' is not configured"
                )));
            }
        }
        Ok(Self { capabilities })
    }

    /// The primary (first configured) module address for a capability.
    pub fn primary_address(&self, capability: &str) -> Result<&ModuleAddress> {
        self.addresses(capability).map(|a| &a[0])
    }

    /// All configured addresses for a capability, in configuration order.
    pub fn addresses(&self, capability: &str) -> Result<&[ModuleAddress]> {
        self.capabilities
            .get(capability)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownCapability(capability.to_string()))
    }

    /// Whether any capability is served by the given module address.
    ///
    /// Resolvers use this to reject identifiers minted by a foreign
    /// deployment before issuing any RPC call.
    pub fn contains_module(&self, address: &ModuleAddress) -> bool {
        self.capabilities
            .values()
            .any(|list| list.iter().any(|a| a == address))
    }

    pub fn capability_names(&self) -> impl Iterator<Item = &str> {
        self.capabilities.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_module(byte: u8) -> String {
        ModuleAddress::from_bytes(&[byte; ModuleAddress::LEN])
            .unwrap()
            .to_string()
    }

    fn config(entries: Vec<(&str, Vec<String>)>) -> RegistryConfig {
        RegistryConfig {
            capabilities: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn primary_is_first_configured() {
        let first = encoded_module(1);
        let second = encoded_module(2);
        let registry = ModuleRegistry::from_config(
            config(vec![("agent", vec![first.clone(), second])]),
            &["agent"],
        )
        .unwrap();
        assert_eq!(
            registry.primary_address("agent").unwrap().to_string(),
            first
        );
    }

    #[test]
    fn missing_required_capability_is_configuration_error() {
        let err =
            ModuleRegistry::from_config(config(vec![]), &["agent"]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn empty_address_list_is_configuration_error() {
        let err = ModuleRegistry::from_config(config(vec![("agent", vec![])]), &[]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn unparseable_address_is_configuration_error() {
        let err = ModuleRegistry::from_config(
            config(vec![("agent", vec!["not-base64!!".to_string()])]),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn unregistered_capability_is_unknown() {
        let registry = ModuleRegistry::from_config(
            config(vec![("agent", vec![encoded_module(1)])]),
            &["agent"],
        )
        .unwrap();
        let err = registry.primary_address("observation").unwrap_err();
        assert!(matches!(err, Error::UnknownCapability(_)));
    }

    #[test]
    fn module_membership() {
        let registry = ModuleRegistry::from_config(
            config(vec![("agent", vec![encoded_module(1)])]),
            &["agent"],
        )
        .unwrap();
        let known = ModuleAddress::from_bytes(&[1; ModuleAddress::LEN]).unwrap();
        let foreign = ModuleAddress::from_bytes(&[9; ModuleAddress::LEN]).unwrap();
        assert!(registry.contains_module(&known));
        assert!(!registry.contains_module(&foreign));
    }
}
