use serde::{Deserialize, Serialize};

/// Hex chain id of BNB Smart Chain mainnet.
pub const BSC_MAINNET_CHAIN_ID: &str = "0x38";

pub const GZ_TOKEN_ADDRESS: &str = "0xcac2f4191B50a3781BA939BDd6cBc88C96F540BC";
pub const GZ_TOKEN_SYMBOL: &str = "GZ";
pub const GZ_TOKEN_DECIMALS: u8 = 18;
pub const GZ_TOKEN_IMAGE: &str = "https://i.imgur.com/pjCy64O.png";

/// EIP-1193 error code: the user rejected the request.
pub const USER_REJECTED: i64 = 4001;
/// EIP-3326 error code: the requested chain is not known to the wallet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

pub mod method {
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ACCOUNTS: &str = "eth_accounts";
    pub const CHAIN_ID: &str = "eth_chainId";
    pub const SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
    pub const ADD_CHAIN: &str = "wallet_addEthereumChain";
    pub const WATCH_ASSET: &str = "wallet_watchAsset";
}

pub mod event {
    pub const ACCOUNTS_CHANGED: &str = "accountsChanged";
    pub const CHAIN_CHANGED: &str = "chainChanged";
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WalletKind {
    #[serde(rename = "metamask")]
    MetaMask,
    Trust,
}

impl WalletKind {
    pub const ALL: [WalletKind; 2] = [WalletKind::MetaMask, WalletKind::Trust];

    pub fn display_name(self) -> &'static str {
        match self {
            WalletKind::MetaMask => "MetaMask",
            WalletKind::Trust => "Trust Wallet",
        }
    }

    pub fn other(self) -> WalletKind {
        match self {
            WalletKind::MetaMask => WalletKind::Trust,
            WalletKind::Trust => WalletKind::MetaMask,
        }
    }
}

impl std::fmt::Display for WalletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Network descriptor in the exact shape `wallet_addEthereumChain` expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl NetworkDescriptor {
    pub fn bsc_mainnet() -> Self {
        Self {
            chain_id: BSC_MAINNET_CHAIN_ID.to_owned(),
            chain_name: "BNB Smart Chain".to_owned(),
            native_currency: NativeCurrency {
                name: "BNB".to_owned(),
                symbol: "BNB".to_owned(),
                decimals: 18,
            },
            rpc_urls: vec!["https://bsc-dataseed1.binance.org".to_owned()],
            block_explorer_urls: vec!["https://bscscan.com".to_owned()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl TokenDescriptor {
    pub fn gz_coin() -> Self {
        Self {
            address: GZ_TOKEN_ADDRESS.to_owned(),
            symbol: GZ_TOKEN_SYMBOL.to_owned(),
            decimals: GZ_TOKEN_DECIMALS,
            image: Some(GZ_TOKEN_IMAGE.to_owned()),
        }
    }

    /// Icon URL, if one is set and not blank.
    pub fn icon(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParams {
    pub chain_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchAssetOptions {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchAssetParams {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub options: WatchAssetOptions,
}

impl WatchAssetParams {
    pub fn erc20(token: &TokenDescriptor) -> Self {
        Self {
            asset_type: "ERC20".to_owned(),
            options: WatchAssetOptions {
                address: token.address.clone(),
                symbol: token.symbol.clone(),
                decimals: token.decimals,
                image: token.icon().map(str::to_owned),
            },
        }
    }
}

/// Human label for a chain id, as shown in the wallet status panel.
pub fn network_name(chain_id: &str) -> String {
    let known = match chain_id {
        "0x38" => "BSC Mainnet ✓",
        "0x61" => "BSC Testnet",
        "0x1" => "Ethereum Mainnet",
        "0x89" => "Polygon Mainnet",
        "0xaa36a7" => "Sepolia Testnet",
        "0x5" => "Goerli Testnet",
        other => return format!("Chain ID: {other}"),
    };
    known.to_owned()
}
