//! The node registry: symbolic name → address + callable interface

use std::{collections::HashMap, str::FromStr, sync::Arc};

use alloy_primitives::Address;

use crate::errors::ConfigError;

/// The shape of a callable operation declared on a node's interface
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// A nullary read-only call returning an address
    AddressGetter,
    /// A read-only call taking one address and returning a bool
    ApprovalCheck,
    /// A state-changing call taking one address
    ReferenceSetter,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::AddressGetter => write!(f, "an address getter"),
            OperationKind::ApprovalCheck => write!(f, "an approval check"),
            OperationKind::ReferenceSetter => write!(f, "a reference setter"),
        }
    }
}

/// The callable surface of a node, as supplied by configuration
#[derive(Clone, Debug, Default)]
pub struct Interface {
    /// Operation name → declared shape
    operations: HashMap<String, OperationKind>,
}

impl Interface {
    /// Create an empty interface
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an operation on the interface
    pub fn with_operation(mut self, name: impl Into<String>, kind: OperationKind) -> Self {
        self.operations.insert(name.into(), kind);
        self
    }

    /// Look up the declared shape of an operation
    pub fn kind_of(&self, name: &str) -> Option<OperationKind> {
        self.operations.get(name).copied()
    }

    /// Iterate over the declared operations
    pub fn operations(&self) -> impl Iterator<Item = (&str, OperationKind)> {
        self.operations.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

/// A registry entry, kept in the form configuration supplied it
#[derive(Clone, Debug)]
struct RegistryEntry {
    /// The stored address value, parsed on resolution
    address: String,
    /// The node's callable interface
    interface: Arc<Interface>,
}

/// A node resolved from the registry
#[derive(Clone, Debug)]
pub struct Node {
    /// The node's symbolic identifier
    pub id: String,
    /// The node's current chain address
    pub address: Address,
    /// The node's callable interface
    pub interface: Arc<Interface>,
}

/// Resolves symbolic node names to addresses and interfaces.
///
/// Backed by static configuration loaded once per run; read-only thereafter, so it is
/// safe to share across concurrent assertion evaluations.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    /// Node id → entry
    entries: HashMap<String, RegistryEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node entry.
    ///
    /// The address is kept as supplied and validated on [`Registry::resolve`].
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        address: impl Into<String>,
        interface: Interface,
    ) {
        self.entries.insert(
            id.into(),
            RegistryEntry {
                address: address.into(),
                interface: Arc::new(interface),
            },
        );
    }

    /// Resolve a node by id, parsing its stored address
    pub fn resolve(&self, id: &str) -> Result<Node, ConfigError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| ConfigError::UnknownNode(id.to_string()))?;

        let address = Address::from_str(&entry.address).map_err(|_| ConfigError::MalformedAddress {
            node: id.to_string(),
            value: entry.address.clone(),
        })?;

        Ok(Node {
            id: id.to_string(),
            address,
            interface: entry.interface.clone(),
        })
    }
}
