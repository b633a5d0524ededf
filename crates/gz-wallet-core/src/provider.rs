//! Injected wallet provider contract (EIP-1193).
//!
//! `Eip1193Provider` is the raw request/subscribe surface; `ProviderExt`
//! layers the typed calls the landing page actually makes on top of it.

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use gz_api_types::{
    NetworkDescriptor, SwitchChainParams, TokenDescriptor, WalletKind, WatchAssetParams, event,
    method,
};
use serde_json::{Value, json};

use crate::error::ProviderError;

/// Identity flags a wallet extension sets on its injected object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderFlags {
    pub is_metamask: bool,
    pub is_trust: bool,
}

impl ProviderFlags {
    pub fn metamask() -> Self {
        Self {
            is_metamask: true,
            is_trust: false,
        }
    }

    pub fn trust() -> Self {
        Self {
            is_metamask: false,
            is_trust: true,
        }
    }

    /// Carries the flag for `kind`, whatever else it claims.
    pub fn has(self, kind: WalletKind) -> bool {
        match kind {
            WalletKind::MetaMask => self.is_metamask,
            WalletKind::Trust => self.is_trust,
        }
    }

    /// Carries the flag for `kind` and not the other one.
    pub fn is_exactly(self, kind: WalletKind) -> bool {
        self.has(kind) && !self.has(kind.other())
    }

    /// Wallet kind assumed for an already-authorized provider found at load.
    pub fn detected_kind(self) -> WalletKind {
        if self.is_trust {
            WalletKind::Trust
        } else {
            WalletKind::MetaMask
        }
    }
}

/// Push notification from a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

impl ProviderEvent {
    /// Decode an `accountsChanged` payload. Anything but a list of strings is
    /// an error, never an empty list: an empty list means disconnect.
    pub fn accounts_changed(payload: Value) -> Result<Self, ProviderError> {
        parse_accounts(event::ACCOUNTS_CHANGED, payload).map(ProviderEvent::AccountsChanged)
    }

    pub fn chain_changed(payload: Value) -> Result<Self, ProviderError> {
        match payload {
            Value::String(id) => Ok(ProviderEvent::ChainChanged(id)),
            other => Err(ProviderError::malformed(event::CHAIN_CHANGED, other)),
        }
    }
}

pub type EventSender = UnboundedSender<ProviderEvent>;

#[async_trait(?Send)]
pub trait Eip1193Provider {
    fn flags(&self) -> ProviderFlags;

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ProviderError>;

    /// Forward `accountsChanged` and `chainChanged` into `events` for the
    /// lifetime of the page.
    fn subscribe(&self, events: EventSender) -> Result<(), ProviderError>;
}

#[async_trait(?Send)]
pub trait ProviderExt: Eip1193Provider {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let raw = self.request(method::REQUEST_ACCOUNTS, None).await?;
        parse_accounts(method::REQUEST_ACCOUNTS, raw)
    }

    /// Accounts already authorized, without prompting.
    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        let raw = self.request(method::ACCOUNTS, None).await?;
        parse_accounts(method::ACCOUNTS, raw)
    }

    async fn chain_id(&self) -> Result<String, ProviderError> {
        let raw = self.request(method::CHAIN_ID, None).await?;
        match raw {
            Value::String(id) => Ok(id),
            other => Err(ProviderError::malformed(method::CHAIN_ID, other)),
        }
    }

    async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderError> {
        let params = SwitchChainParams {
            chain_id: chain_id.to_owned(),
        };
        self.request(method::SWITCH_CHAIN, Some(json!([params])))
            .await
            .map(drop)
    }

    async fn add_chain(&self, network: &NetworkDescriptor) -> Result<(), ProviderError> {
        self.request(method::ADD_CHAIN, Some(json!([network])))
            .await
            .map(drop)
    }

    /// Ask the wallet to track `token`. Resolves to whether the visitor accepted.
    async fn watch_asset(&self, token: &TokenDescriptor) -> Result<bool, ProviderError> {
        let params = serde_json::to_value(WatchAssetParams::erc20(token))
            .map_err(|e| ProviderError::malformed(method::WATCH_ASSET, e))?;
        let raw = self.request(method::WATCH_ASSET, Some(params)).await?;
        Ok(raw.as_bool().unwrap_or(false))
    }
}

impl<P: Eip1193Provider> ProviderExt for P {}

fn parse_accounts(method: &str, raw: Value) -> Result<Vec<String>, ProviderError> {
    serde_json::from_value(raw).map_err(|e| ProviderError::malformed(method, e))
}
