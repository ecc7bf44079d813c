//! The assertion catalog: the static table of wiring relationships to check and set

use std::collections::HashSet;

use crate::{
    errors::ConfigError,
    registry::{OperationKind, Registry},
};

/// How an assertion is checked against remote state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssertionMode {
    /// The operation returns an address which must equal the expected target's address
    GetterEquality,
    /// The operation takes the expected target's address and returns a bool directly
    BooleanCheck,
}

/// The state-changing correction associated with a mutable assertion.
///
/// The setter operation is invoked on the assertion's source node with the target
/// node's address as sole argument.
#[derive(Clone, Debug)]
pub struct SetAction {
    /// The setter operation's name on the source node's interface
    pub operation: String,
    /// The node whose address is passed to the setter
    pub target: String,
}

/// A declarative statement that one node's reference or approval should point at
/// another node
#[derive(Clone, Debug)]
pub struct Assertion {
    /// Unique identifier within the catalog
    pub id: String,
    /// The node whose state is checked
    pub source: String,
    /// The read operation used to check the assertion
    pub operation: String,
    /// The node the source is expected to reference or approve
    pub expected_target: String,
    /// How the read result is classified
    pub mode: AssertionMode,
    /// The correction to apply on mismatch, if the assertion is mutable
    pub set: Option<SetAction>,
}

impl Assertion {
    /// An assertion checked by comparing a getter's returned address to the expected
    /// target's address
    pub fn getter(
        id: impl Into<String>,
        source: impl Into<String>,
        operation: impl Into<String>,
        expected_target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            operation: operation.into(),
            expected_target: expected_target.into(),
            mode: AssertionMode::GetterEquality,
            set: None,
        }
    }

    /// An assertion checked by calling a boolean operation with the expected target's
    /// address
    pub fn check(
        id: impl Into<String>,
        source: impl Into<String>,
        operation: impl Into<String>,
        expected_target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            operation: operation.into(),
            expected_target: expected_target.into(),
            mode: AssertionMode::BooleanCheck,
            set: None,
        }
    }

    /// Attach a setter invoked with the expected target's address
    pub fn with_setter(mut self, operation: impl Into<String>) -> Self {
        self.set = Some(SetAction {
            operation: operation.into(),
            target: self.expected_target.clone(),
        });
        self
    }
}

/// An ordered collection of assertions.
///
/// Declaration order is evaluation order; the engine does not infer dependencies
/// between assertions.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// The assertions, in declaration order
    assertions: Vec<Assertion>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assertion
    pub fn push(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    /// The number of assertions in the catalog
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Iterate over the assertions in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.iter()
    }

    /// Look up an assertion by id
    pub fn get(&self, id: &str) -> Option<&Assertion> {
        self.assertions.iter().find(|a| a.id == id)
    }

    /// Select assertions for a run, preserving declaration order.
    ///
    /// `None` selects the whole catalog; a subset naming an unknown id is a fatal
    /// configuration error.
    pub fn select(&self, subset: Option<&[String]>) -> Result<Vec<&Assertion>, ConfigError> {
        let Some(ids) = subset else {
            return Ok(self.assertions.iter().collect());
        };

        for id in ids {
            if self.get(id).is_none() {
                return Err(ConfigError::UnknownAssertion(id.clone()));
            }
        }

        Ok(self
            .assertions
            .iter()
            .filter(|a| ids.iter().any(|id| *id == a.id))
            .collect())
    }

    /// Validate the catalog against a registry.
    ///
    /// Checks id uniqueness, node existence, address well-formedness, and that every
    /// referenced operation is declared with the shape its use requires. All failures
    /// are fatal and surface before any outcome is produced.
    pub fn validate(&self, registry: &Registry) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for assertion in &self.assertions {
            if !seen.insert(assertion.id.as_str()) {
                return Err(ConfigError::DuplicateAssertion(assertion.id.clone()));
            }

            let source = registry.resolve(&assertion.source)?;
            registry.resolve(&assertion.expected_target)?;

            let required = match assertion.mode {
                AssertionMode::GetterEquality => OperationKind::AddressGetter,
                AssertionMode::BooleanCheck => OperationKind::ApprovalCheck,
            };
            check_operation(&source.id, source.interface.kind_of(&assertion.operation), &assertion.operation, required)?;

            if let Some(set) = &assertion.set {
                registry.resolve(&set.target)?;
                check_operation(
                    &source.id,
                    source.interface.kind_of(&set.operation),
                    &set.operation,
                    OperationKind::ReferenceSetter,
                )?;
            }
        }

        Ok(())
    }
}

/// Check that an operation is declared and has the required shape
fn check_operation(
    node: &str,
    declared: Option<OperationKind>,
    operation: &str,
    required: OperationKind,
) -> Result<(), ConfigError> {
    match declared {
        None => Err(ConfigError::UnknownOperation {
            node: node.to_string(),
            operation: operation.to_string(),
        }),
        Some(kind) if kind != required => Err(ConfigError::WrongOperationKind {
            node: node.to_string(),
            operation: operation.to_string(),
            expected: required,
        }),
        Some(_) => Ok(()),
    }
}
