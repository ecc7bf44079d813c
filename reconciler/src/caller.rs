//! The remote caller abstraction: how the engine reaches the remote system

use alloy_primitives::Address;

use crate::{errors::RemoteError, registry::Node};

/// A decoded value returned by a read-only call
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallValue {
    /// An address return value
    Addr(Address),
    /// A boolean return value
    Flag(bool),
}

/// The remote system's finality report for a submitted state-changing call
#[derive(Clone, Debug)]
pub struct Confirmation {
    /// Whether the call was finalized successfully
    pub success: bool,
    /// Remote-system detail accompanying a failed confirmation
    pub detail: Option<String>,
}

/// Executes calls against a node's interface through an external transport.
///
/// Implementations handle authentication and signing of state-changing calls; the
/// engine never manages keys. A `write_call` mutates remote state exactly once per
/// successful confirmed call and must never be retried internally — retry policy
/// belongs to the engine's caller.
#[allow(async_fn_in_trait)]
pub trait RemoteCaller {
    /// A handle to a submitted state-changing call, awaitable for finality
    type Handle;

    /// Execute a read-only call and decode its return value
    async fn read_call(
        &self,
        node: &Node,
        operation: &str,
        args: &[Address],
    ) -> Result<CallValue, RemoteError>;

    /// Submit a state-changing call with the target address as sole argument
    async fn write_call(
        &self,
        node: &Node,
        operation: &str,
        target: Address,
    ) -> Result<Self::Handle, RemoteError>;

    /// Block until the remote system finalizes the submitted call.
    ///
    /// Does not retry internally; timeouts are enforced by the engine.
    async fn await_confirmation(&self, handle: Self::Handle) -> Result<Confirmation, RemoteError>;
}
