//! The alloy-backed remote caller used against a live network.
//!
//! Each node's interface descriptor is turned into a human-readable ABI, and calls are
//! dispatched dynamically by operation name, mirroring how the catalog references
//! operations. Signing uses a local private key attached to the provider.

use std::str::FromStr;

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    network::{Ethereum, EthereumWallet},
    providers::{DynProvider, PendingTransactionBuilder, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::{http::reqwest::Url, TransportError},
};
use alloy_contract::{ContractInstance, Interface as AbiInterface};
use alloy_primitives::Address;
use reconciler::{
    caller::{CallValue, Confirmation, RemoteCaller},
    errors::RemoteError,
    registry::{Node, OperationKind},
};

use crate::errors::ScriptError;

/// A remote caller backed by an alloy HTTP provider with a local signer
pub struct AlloyCaller {
    /// The wallet-attached provider
    provider: DynProvider,
}

/// Connect a caller to the network, attaching the signer for state-changing calls
pub fn connect(priv_key: &str, rpc_url: &str) -> Result<AlloyCaller, ScriptError> {
    let url =
        Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    // `ProviderBuilder::new()` installs the recommended fillers, whose nonce
    // filler already defaults to simple (uncached) nonce management.
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok(AlloyCaller {
        provider: DynProvider::new(provider),
    })
}

/// The human-readable ABI signature for a declared operation
fn operation_signature(name: &str, kind: OperationKind) -> String {
    match kind {
        OperationKind::AddressGetter => {
            format!("function {}() external view returns (address)", name)
        }
        OperationKind::ApprovalCheck => {
            format!("function {}(address) external view returns (bool)", name)
        }
        OperationKind::ReferenceSetter => format!("function {}(address) external", name),
    }
}

impl AlloyCaller {
    /// Build a dynamic contract instance from a node's interface descriptor
    fn instance(&self, node: &Node) -> Result<ContractInstance<DynProvider, Ethereum>, RemoteError> {
        let signatures: Vec<String> = node
            .interface
            .operations()
            .map(|(name, kind)| operation_signature(name, kind))
            .collect();
        let abi = JsonAbi::parse(signatures.iter().map(String::as_str))
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        Ok(ContractInstance::new(
            node.address,
            self.provider.clone(),
            AbiInterface::new(abi),
        ))
    }
}

impl RemoteCaller for AlloyCaller {
    type Handle = PendingTransactionBuilder<Ethereum>;

    async fn read_call(
        &self,
        node: &Node,
        operation: &str,
        args: &[Address],
    ) -> Result<CallValue, RemoteError> {
        let contract = self.instance(node)?;
        let dyn_args: Vec<DynSolValue> =
            args.iter().map(|addr| DynSolValue::Address(*addr)).collect();

        let call = contract
            .function(operation, &dyn_args)
            .map_err(classify_contract_error)?;
        let returned = call.call().await.map_err(classify_contract_error)?;

        match returned.into_iter().next() {
            Some(DynSolValue::Address(addr)) => Ok(CallValue::Addr(addr)),
            Some(DynSolValue::Bool(flag)) => Ok(CallValue::Flag(flag)),
            Some(other) => Err(RemoteError::Decode(format!(
                "unsupported return type for `{}`: {:?}",
                operation,
                other.as_type()
            ))),
            None => Err(RemoteError::Decode(format!(
                "empty return data for `{}`",
                operation
            ))),
        }
    }

    async fn write_call(
        &self,
        node: &Node,
        operation: &str,
        target: Address,
    ) -> Result<Self::Handle, RemoteError> {
        let contract = self.instance(node)?;
        let call = contract
            .function(operation, &[DynSolValue::Address(target)])
            .map_err(classify_contract_error)?;

        call.send().await.map_err(classify_contract_error)
    }

    async fn await_confirmation(&self, handle: Self::Handle) -> Result<Confirmation, RemoteError> {
        let receipt = handle
            .get_receipt()
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;

        let success = receipt.status();
        let detail =
            (!success).then(|| format!("transaction {:#x} reverted", receipt.transaction_hash));
        Ok(Confirmation { success, detail })
    }
}

/// Map an alloy contract error into the remote error taxonomy
fn classify_contract_error(err: alloy_contract::Error) -> RemoteError {
    match err {
        alloy_contract::Error::TransportError(e) => classify_transport_error(e),
        alloy_contract::Error::AbiError(e) => RemoteError::Decode(e.to_string()),
        other => RemoteError::Rejected(other.to_string()),
    }
}

/// Map a transport-layer error into the remote error taxonomy.
///
/// Error responses from the node are inspected for the common revert, authorization,
/// and pricing phrasings; anything without a response payload is a transport failure.
fn classify_transport_error(err: TransportError) -> RemoteError {
    match err.as_error_resp() {
        Some(payload) => {
            let message = payload.message.to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("revert") {
                RemoteError::Reverted(message)
            } else if lowered.contains("unauthorized") || lowered.contains("not authorized") {
                RemoteError::Unauthorized(message)
            } else if lowered.contains("underpriced") {
                RemoteError::Underpriced(message)
            } else {
                RemoteError::Rejected(message)
            }
        }
        None => RemoteError::Unreachable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use alloy::json_abi::JsonAbi;
    use reconciler::registry::OperationKind;

    use super::operation_signature;

    #[test]
    fn test_operation_signatures_parse() {
        let signatures = vec![
            operation_signature("bondContract", OperationKind::AddressGetter),
            operation_signature("isTreasuryApproved", OperationKind::ApprovalCheck),
            operation_signature("setBondContract", OperationKind::ReferenceSetter),
        ];
        let abi = JsonAbi::parse(signatures.iter().map(String::as_str)).unwrap();

        assert!(abi.function("bondContract").is_some());
        assert!(abi.function("isTreasuryApproved").is_some());
        assert!(abi.function("setBondContract").is_some());
    }
}
