//! Definitions of errors that can occur while reconciling a deployment's wiring

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::registry::OperationKind;

/// Fatal configuration errors, surfaced before any outcome is produced.
///
/// These indicate a broken registry or catalog rather than a problem with the
/// remote system, and abort the run immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A catalog assertion references a node with no registry entry
    UnknownNode(String),
    /// A registry entry's stored address is not a syntactically valid chain address
    MalformedAddress {
        /// The node whose entry is malformed
        node: String,
        /// The stored address value
        value: String,
    },
    /// Two catalog assertions share the same identifier
    DuplicateAssertion(String),
    /// An assertion references an operation absent from its source node's interface
    UnknownOperation {
        /// The node whose interface was consulted
        node: String,
        /// The missing operation name
        operation: String,
    },
    /// An assertion references an operation whose declared shape does not fit its use
    WrongOperationKind {
        /// The node whose interface was consulted
        node: String,
        /// The operation with the mismatched shape
        operation: String,
        /// The shape the assertion requires
        expected: OperationKind,
    },
    /// A requested subset names an assertion id absent from the catalog
    UnknownAssertion(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownNode(id) => write!(f, "unknown node `{}`", id),
            ConfigError::MalformedAddress { node, value } => {
                write!(f, "malformed address `{}` for node `{}`", value, node)
            }
            ConfigError::DuplicateAssertion(id) => {
                write!(f, "duplicate assertion id `{}`", id)
            }
            ConfigError::UnknownOperation { node, operation } => {
                write!(f, "node `{}` has no operation `{}`", node, operation)
            }
            ConfigError::WrongOperationKind {
                node,
                operation,
                expected,
            } => write!(
                f,
                "operation `{}` on node `{}` is not declared as {}",
                operation, node, expected
            ),
            ConfigError::UnknownAssertion(id) => {
                write!(f, "assertion `{}` is not in the catalog", id)
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors raised by a remote call, localized to the affected assertion's outcome.
///
/// These never abort a run; the engine folds them into per-assertion outcomes so
/// that the caller always receives a complete report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteError {
    /// The remote system could not be reached
    Unreachable(String),
    /// The remote system rejected the call at the protocol layer
    Reverted(String),
    /// The return value did not match the operation's declared shape
    Decode(String),
    /// The caller lacks the rights to invoke the state-changing operation
    Unauthorized(String),
    /// The submission was priced below what the remote system accepts
    Underpriced(String),
    /// The remote system refused the submission for another reason
    Rejected(String),
    /// Finality was not observed within the configured timeout
    ConfirmationTimeout,
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Unreachable(s) => write!(f, "remote system unreachable: {}", s),
            RemoteError::Reverted(s) => write!(f, "call reverted: {}", s),
            RemoteError::Decode(s) => write!(f, "error decoding return value: {}", s),
            RemoteError::Unauthorized(s) => write!(f, "caller not authorized: {}", s),
            RemoteError::Underpriced(s) => write!(f, "submission underpriced: {}", s),
            RemoteError::Rejected(s) => write!(f, "submission rejected: {}", s),
            RemoteError::ConfirmationTimeout => {
                write!(f, "confirmation not observed before the timeout expired")
            }
        }
    }
}

impl Error for RemoteError {}
