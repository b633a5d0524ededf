//! Wallet session state.
//!
//! One `Session` per page. All mutation goes through [`Session::apply`], which
//! reports what changed so the connector can render it.

use gz_api_types::WalletKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone)]
pub struct Session<P> {
    account: Option<String>,
    chain_id: Option<String>,
    kind: Option<WalletKind>,
    provider: Option<P>,
    metamask: ControlState,
    trust: ControlState,
}

impl<P> Default for Session<P> {
    fn default() -> Self {
        Self {
            account: None,
            chain_id: None,
            kind: None,
            provider: None,
            metamask: ControlState::Disconnected,
            trust: ControlState::Disconnected,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionUpdate<P> {
    Connecting(WalletKind),
    /// Account access granted by `provider` during an explicit connect.
    Granted {
        kind: WalletKind,
        account: String,
        provider: P,
    },
    Failed(WalletKind),
    /// A provider already authorized for this page, found at load.
    Detected { kind: WalletKind, provider: P },
    AccountsChanged(Vec<String>),
    ChainChanged(String),
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    Connecting(WalletKind),
    Connected { kind: WalletKind, account: String },
    Network(String),
    Failed(WalletKind),
    Cleared,
}

impl<P> Session<P> {
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.chain_id.as_deref()
    }

    pub fn kind(&self) -> Option<WalletKind> {
        self.kind
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn control(&self, kind: WalletKind) -> ControlState {
        match kind {
            WalletKind::MetaMask => self.metamask,
            WalletKind::Trust => self.trust,
        }
    }

    fn set_control(&mut self, kind: WalletKind, state: ControlState) {
        match kind {
            WalletKind::MetaMask => self.metamask = state,
            WalletKind::Trust => self.trust = state,
        }
    }

    fn clear(&mut self) {
        *self = Self {
            kind: self.kind,
            ..Self::default()
        };
    }

    pub fn apply(&mut self, update: SessionUpdate<P>) -> SessionChange {
        match update {
            SessionUpdate::Connecting(kind) => {
                self.kind = Some(kind);
                self.set_control(kind, ControlState::Connecting);
                SessionChange::Connecting(kind)
            }
            SessionUpdate::Granted {
                kind,
                account,
                provider,
            } => {
                self.kind = Some(kind);
                self.provider = Some(provider);
                self.account = Some(account.clone());
                self.set_control(kind, ControlState::Connected);
                SessionChange::Connected { kind, account }
            }
            SessionUpdate::Failed(kind) => {
                self.clear();
                SessionChange::Failed(kind)
            }
            SessionUpdate::Detected { kind, provider } => {
                self.kind = Some(kind);
                self.provider = Some(provider);
                SessionChange::Unchanged
            }
            SessionUpdate::AccountsChanged(accounts) => {
                let Some(first) = accounts.into_iter().next() else {
                    self.clear();
                    return SessionChange::Cleared;
                };
                if self.account.as_deref() == Some(first.as_str()) {
                    return SessionChange::Unchanged;
                }
                let kind = self.kind.unwrap_or(WalletKind::MetaMask);
                self.kind = Some(kind);
                self.account = Some(first.clone());
                self.set_control(kind, ControlState::Connected);
                SessionChange::Connected {
                    kind,
                    account: first,
                }
            }
            SessionUpdate::ChainChanged(chain_id) => {
                self.chain_id = Some(chain_id.clone());
                SessionChange::Network(chain_id)
            }
            SessionUpdate::Disconnect => {
                self.clear();
                SessionChange::Cleared
            }
        }
    }
}
