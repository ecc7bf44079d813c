//! Constants used in the wiring scripts

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The MRAY token key in the deployments file
pub const MRAY_TOKEN_KEY: &str = "mray_token";

/// The MUSD token key in the deployments file
pub const MUSD_TOKEN_KEY: &str = "musd_token";

/// The USDC token key in the deployments file
pub const USDC_TOKEN_KEY: &str = "usdc_token";

/// The treasury contract key in the deployments file
pub const TREASURY_KEY: &str = "treasury";

/// The document NFT contract key in the deployments file
pub const DOCUMENT_NFT_KEY: &str = "document_nft";

/// The real-world-asset NFT contract key in the deployments file
pub const RWA_NFT_KEY: &str = "rwa_nft";

/// The USDC deposit NFT contract key in the deployments file
pub const USDC_DEPOSIT_NFT_KEY: &str = "usdc_deposit_nft";

/// The wallet NFT contract key in the deployments file
pub const WALLET_NFT_KEY: &str = "wallet_nft";

/// The wallet fees NFT contract key in the deployments file
pub const WALLET_FEES_NFT_KEY: &str = "wallet_fees_nft";

/// The bond contract key in the deployments file
pub const BOND_KEY: &str = "bond";

/// The bond offer NFT contract key in the deployments file
pub const BOND_OFFER_NFT_KEY: &str = "bond_offer_nft";

/// The bond fees NFT contract key in the deployments file
pub const BOND_FEES_NFT_KEY: &str = "bond_fees_nft";

/// The bond investment contract key in the deployments file
pub const BOND_INVESTMENT_KEY: &str = "bond_investment";

/// The bond offer view contract key in the deployments file
pub const BOND_OFFER_VIEW_KEY: &str = "bond_offer_view";
