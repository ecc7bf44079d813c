//! The static wiring catalog of the platform contracts.
//!
//! One assertion per cross-contract address reference or access approval, each paired
//! with the setter that corrects it. Declaration order is evaluation order.

use reconciler::{
    catalog::{Assertion, Catalog},
    registry::{Interface, OperationKind},
};

use crate::{
    constants::{
        BOND_FEES_NFT_KEY, BOND_INVESTMENT_KEY, BOND_KEY, BOND_OFFER_NFT_KEY, BOND_OFFER_VIEW_KEY,
        DOCUMENT_NFT_KEY, MRAY_TOKEN_KEY, MUSD_TOKEN_KEY, RWA_NFT_KEY, TREASURY_KEY,
        USDC_DEPOSIT_NFT_KEY, USDC_TOKEN_KEY, WALLET_FEES_NFT_KEY, WALLET_NFT_KEY,
    },
    types::AssertionKind,
};

/// An interface with the standard treasury/bond approval surface
fn approval_interface(with_bond: bool) -> Interface {
    let interface = Interface::new()
        .with_operation("isTreasuryApproved", OperationKind::ApprovalCheck)
        .with_operation("approveTreasuryContract", OperationKind::ReferenceSetter);
    if with_bond {
        interface
            .with_operation("isBondApproved", OperationKind::ApprovalCheck)
            .with_operation("approveBondContract", OperationKind::ReferenceSetter)
    } else {
        interface
    }
}

/// The interface descriptor of every platform node, keyed by its deployments-file key
pub fn platform_interfaces() -> Vec<(&'static str, Interface)> {
    vec![
        (
            MRAY_TOKEN_KEY,
            Interface::new()
                .with_operation("treasury", OperationKind::AddressGetter)
                .with_operation("setTreasury", OperationKind::ReferenceSetter),
        ),
        (MUSD_TOKEN_KEY, approval_interface(false)),
        // Externally-issued token, no wiring surface of its own
        (USDC_TOKEN_KEY, Interface::new()),
        (
            TREASURY_KEY,
            Interface::new()
                .with_operation("musdTokenContract", OperationKind::AddressGetter)
                .with_operation("setMUSDContract", OperationKind::ReferenceSetter)
                .with_operation("mrayTokenContract", OperationKind::AddressGetter)
                .with_operation("setMRAYContract", OperationKind::ReferenceSetter)
                .with_operation("rwaNftContract", OperationKind::AddressGetter)
                .with_operation("setRwaNftContract", OperationKind::ReferenceSetter)
                .with_operation("usdcDepositsContract", OperationKind::AddressGetter)
                .with_operation("setDepositUSDCContract", OperationKind::ReferenceSetter)
                .with_operation("usdcTokenContract", OperationKind::AddressGetter)
                .with_operation("setUsdcTokenContract", OperationKind::ReferenceSetter)
                .with_operation("walletNFTContract", OperationKind::AddressGetter)
                .with_operation("setWalletNFTContract", OperationKind::ReferenceSetter)
                .with_operation("walletFeesNFTContract", OperationKind::AddressGetter)
                .with_operation("setWalletFeesNFTContract", OperationKind::ReferenceSetter)
                .with_operation("bondContract", OperationKind::AddressGetter)
                .with_operation("setBondContract", OperationKind::ReferenceSetter),
        ),
        (
            DOCUMENT_NFT_KEY,
            Interface::new()
                .with_operation("rwaContract", OperationKind::AddressGetter)
                .with_operation("setRWAContract", OperationKind::ReferenceSetter),
        ),
        (
            RWA_NFT_KEY,
            Interface::new()
                .with_operation("documentContract", OperationKind::AddressGetter)
                .with_operation("setDocumentContract", OperationKind::ReferenceSetter),
        ),
        (USDC_DEPOSIT_NFT_KEY, approval_interface(false)),
        (WALLET_NFT_KEY, approval_interface(true)),
        (WALLET_FEES_NFT_KEY, approval_interface(true)),
        (
            BOND_KEY,
            approval_interface(false)
                .with_operation("walletNFTContract", OperationKind::AddressGetter)
                .with_operation("setWalletNFTContract", OperationKind::ReferenceSetter)
                .with_operation("walletFeesNFTContract", OperationKind::AddressGetter)
                .with_operation("setWalletFeesNFTContract", OperationKind::ReferenceSetter)
                .with_operation("bondOfferNFTContract", OperationKind::AddressGetter)
                .with_operation("setBondOfferNFTContract", OperationKind::ReferenceSetter)
                .with_operation("bondFeesNFTContract", OperationKind::AddressGetter)
                .with_operation("setBondFeesNFTContract", OperationKind::ReferenceSetter)
                .with_operation("bondInvestmentContract", OperationKind::AddressGetter)
                .with_operation("setBondInvestmentContract", OperationKind::ReferenceSetter),
        ),
        (
            BOND_OFFER_NFT_KEY,
            approval_interface(true)
                .with_operation("bondOfferNFTViewContract", OperationKind::AddressGetter)
                .with_operation("setBondOfferNFTViewContract", OperationKind::ReferenceSetter),
        ),
        (BOND_FEES_NFT_KEY, approval_interface(true)),
        (BOND_INVESTMENT_KEY, approval_interface(true)),
        (
            BOND_OFFER_VIEW_KEY,
            Interface::new()
                .with_operation("isBondOfferApproved", OperationKind::ApprovalCheck)
                .with_operation("approveBondOfferContract", OperationKind::ReferenceSetter),
        ),
    ]
}

/// The address-reference assertions: each contract's stored reference to a peer
fn address_assertions() -> Vec<Assertion> {
    vec![
        Assertion::getter("mray-treasury", MRAY_TOKEN_KEY, "treasury", TREASURY_KEY)
            .with_setter("setTreasury"),
        Assertion::getter("document-rwa", DOCUMENT_NFT_KEY, "rwaContract", RWA_NFT_KEY)
            .with_setter("setRWAContract"),
        Assertion::getter("rwa-document", RWA_NFT_KEY, "documentContract", DOCUMENT_NFT_KEY)
            .with_setter("setDocumentContract"),
        Assertion::getter("treasury-musd", TREASURY_KEY, "musdTokenContract", MUSD_TOKEN_KEY)
            .with_setter("setMUSDContract"),
        Assertion::getter("treasury-mray", TREASURY_KEY, "mrayTokenContract", MRAY_TOKEN_KEY)
            .with_setter("setMRAYContract"),
        Assertion::getter("treasury-rwa", TREASURY_KEY, "rwaNftContract", RWA_NFT_KEY)
            .with_setter("setRwaNftContract"),
        Assertion::getter(
            "treasury-usdc-deposit",
            TREASURY_KEY,
            "usdcDepositsContract",
            USDC_DEPOSIT_NFT_KEY,
        )
        .with_setter("setDepositUSDCContract"),
        Assertion::getter("treasury-usdc", TREASURY_KEY, "usdcTokenContract", USDC_TOKEN_KEY)
            .with_setter("setUsdcTokenContract"),
        Assertion::getter("treasury-wallet", TREASURY_KEY, "walletNFTContract", WALLET_NFT_KEY)
            .with_setter("setWalletNFTContract"),
        Assertion::getter(
            "treasury-wallet-fees",
            TREASURY_KEY,
            "walletFeesNFTContract",
            WALLET_FEES_NFT_KEY,
        )
        .with_setter("setWalletFeesNFTContract"),
        Assertion::getter("treasury-bond", TREASURY_KEY, "bondContract", BOND_KEY)
            .with_setter("setBondContract"),
        Assertion::getter("bond-wallet", BOND_KEY, "walletNFTContract", WALLET_NFT_KEY)
            .with_setter("setWalletNFTContract"),
        Assertion::getter(
            "bond-wallet-fees",
            BOND_KEY,
            "walletFeesNFTContract",
            WALLET_FEES_NFT_KEY,
        )
        .with_setter("setWalletFeesNFTContract"),
        Assertion::getter("bond-offer", BOND_KEY, "bondOfferNFTContract", BOND_OFFER_NFT_KEY)
            .with_setter("setBondOfferNFTContract"),
        Assertion::getter("bond-fees", BOND_KEY, "bondFeesNFTContract", BOND_FEES_NFT_KEY)
            .with_setter("setBondFeesNFTContract"),
        Assertion::getter(
            "bond-investment",
            BOND_KEY,
            "bondInvestmentContract",
            BOND_INVESTMENT_KEY,
        )
        .with_setter("setBondInvestmentContract"),
        Assertion::getter(
            "offer-offer-view",
            BOND_OFFER_NFT_KEY,
            "bondOfferNFTViewContract",
            BOND_OFFER_VIEW_KEY,
        )
        .with_setter("setBondOfferNFTViewContract"),
    ]
}

/// An access assertion that `source` approves the treasury as a caller
fn treasury_access(id: &str, source: &'static str) -> Assertion {
    Assertion::check(id, source, "isTreasuryApproved", TREASURY_KEY)
        .with_setter("approveTreasuryContract")
}

/// An access assertion that `source` approves the bond contract as a caller
fn bond_access(id: &str, source: &'static str) -> Assertion {
    Assertion::check(id, source, "isBondApproved", BOND_KEY).with_setter("approveBondContract")
}

/// The access-approval assertions: which contracts may drive which
fn access_assertions() -> Vec<Assertion> {
    vec![
        treasury_access("musd-treasury-access", MUSD_TOKEN_KEY),
        treasury_access("bond-fees-treasury-access", BOND_FEES_NFT_KEY),
        bond_access("bond-fees-bond-access", BOND_FEES_NFT_KEY),
        treasury_access("bond-offer-treasury-access", BOND_OFFER_NFT_KEY),
        bond_access("bond-offer-bond-access", BOND_OFFER_NFT_KEY),
        treasury_access("deposit-treasury-access", USDC_DEPOSIT_NFT_KEY),
        treasury_access("investment-treasury-access", BOND_INVESTMENT_KEY),
        bond_access("investment-bond-access", BOND_INVESTMENT_KEY),
        treasury_access("bond-treasury-access", BOND_KEY),
        treasury_access("wallet-treasury-access", WALLET_NFT_KEY),
        bond_access("wallet-bond-access", WALLET_NFT_KEY),
        treasury_access("wallet-fees-treasury-access", WALLET_FEES_NFT_KEY),
        bond_access("wallet-fees-bond-access", WALLET_FEES_NFT_KEY),
        Assertion::check(
            "offer-view-offer-access",
            BOND_OFFER_VIEW_KEY,
            "isBondOfferApproved",
            BOND_OFFER_NFT_KEY,
        )
        .with_setter("approveBondOfferContract"),
    ]
}

/// Build the wiring catalog, optionally restricted to one kind of assertion
pub fn wiring_catalog(kind: AssertionKind) -> Catalog {
    let mut catalog = Catalog::new();
    if matches!(kind, AssertionKind::Address | AssertionKind::All) {
        for assertion in address_assertions() {
            catalog.push(assertion);
        }
    }
    if matches!(kind, AssertionKind::Access | AssertionKind::All) {
        for assertion in access_assertions() {
            catalog.push(assertion);
        }
    }
    catalog
}
