//! Loading the node registry from the deployments file.
//!
//! The deployments file is a flat JSON object mapping each contract key to its hex
//! address. Addresses are kept as stored; syntactic validation happens when the
//! registry resolves a node, so a malformed entry surfaces as a configuration error.

use std::fs;

use reconciler::registry::Registry;
use serde_json::Value;

use crate::{catalog::platform_interfaces, errors::ScriptError};

/// Load the platform registry from the deployments file at the given path
pub fn load_registry(path: &str) -> Result<Registry, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", path, e)))?;
    let parsed: Value = serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    let mut registry = Registry::new();
    for (key, interface) in platform_interfaces() {
        let address = parsed.get(key).and_then(Value::as_str).ok_or_else(|| {
            ScriptError::ReadDeployments(format!("key `{}` not found in {}", key, path))
        })?;
        registry.insert(key, address, interface);
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use reconciler::errors::ConfigError;
    use tempfile::NamedTempFile;

    use super::load_registry;
    use crate::{catalog::platform_interfaces, constants::TREASURY_KEY, errors::ScriptError};

    /// Write a deployments file with every platform key mapped to `address`
    fn deployments_file(address: &str) -> NamedTempFile {
        let entries: Vec<String> = platform_interfaces()
            .iter()
            .map(|(key, _)| format!("\"{}\": \"{}\"", key, address))
            .collect();
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{{}}}", entries.join(", ")).unwrap();
        file
    }

    #[test]
    fn test_load_registry_resolves_all_nodes() {
        let file = deployments_file("0x00000000000000000000000000000000000000cd");
        let registry = load_registry(file.path().to_str().unwrap()).unwrap();

        for (key, _) in platform_interfaces() {
            registry.resolve(key).unwrap();
        }
    }

    #[test]
    fn test_load_registry_missing_key() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"{}\": \"0x{:040x}\"}}", TREASURY_KEY, 1).unwrap();

        let err = load_registry(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ScriptError::ReadDeployments(_)));
    }

    #[test]
    fn test_malformed_address_surfaces_on_resolve() {
        // Loading keeps the stored value; resolution reports the malformed entry
        let file = deployments_file("not-an-address");
        let registry = load_registry(file.path().to_str().unwrap()).unwrap();

        assert!(matches!(
            registry.resolve(TREASURY_KEY).unwrap_err(),
            ConfigError::MalformedAddress { .. }
        ));
    }
}
