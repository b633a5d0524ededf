use gz_api_types::{NetworkDescriptor, TokenDescriptor, WalletKind};
use serde::{Deserialize, Serialize};

pub const METAMASK_DOWNLOAD_URL: &str = "https://metamask.io/download/";
pub const TRUST_DOWNLOAD_URL: &str = "https://trustwallet.com/download";
pub const TRUST_DEEP_LINK_PREFIX: &str = "https://link.trustwallet.com/open_url?coin_id=20000714&url=";
pub const WAITLIST_STORAGE_KEY: &str = "gzcoin_waitlist_email";

/// Landing page settings. Every field has a built-in default, so a partial
/// override object from the page is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingConfig {
    pub network: NetworkDescriptor,
    pub token: TokenDescriptor,
    pub metamask_download_url: String,
    pub trust_download_url: String,
    pub trust_deep_link_prefix: String,
    pub install_prompt_delay_ms: u32,
    pub deep_link_delay_ms: u32,
    pub token_notice_ms: u32,
    pub waitlist_key: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            network: NetworkDescriptor::bsc_mainnet(),
            token: TokenDescriptor::gz_coin(),
            metamask_download_url: METAMASK_DOWNLOAD_URL.to_owned(),
            trust_download_url: TRUST_DOWNLOAD_URL.to_owned(),
            trust_deep_link_prefix: TRUST_DEEP_LINK_PREFIX.to_owned(),
            install_prompt_delay_ms: 2_000,
            deep_link_delay_ms: 1_000,
            token_notice_ms: 10_000,
            waitlist_key: WAITLIST_STORAGE_KEY.to_owned(),
        }
    }
}

impl LandingConfig {
    pub fn download_url(&self, kind: WalletKind) -> &str {
        match kind {
            WalletKind::MetaMask => &self.metamask_download_url,
            WalletKind::Trust => &self.trust_download_url,
        }
    }

    /// Trust Wallet app link opening `encoded_page_url` (already URI-component encoded).
    pub fn trust_deep_link(&self, encoded_page_url: &str) -> String {
        format!("{}{}", self.trust_deep_link_prefix, encoded_page_url)
    }
}
