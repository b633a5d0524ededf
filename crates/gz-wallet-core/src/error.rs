use gz_api_types::{USER_REJECTED, UNRECOGNIZED_CHAIN, WalletKind};
use serde_json::Value;
use thiserror::Error;

/// Failure reported by an injected provider, decoded from its JS error object.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message} (code {code:?})")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
    pub data: Option<Value>,
}

impl ProviderError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn rejected() -> Self {
        Self::new(Some(USER_REJECTED), "User rejected the request.")
    }

    pub fn unrecognized_chain() -> Self {
        Self::new(Some(UNRECOGNIZED_CHAIN), "Unrecognized chain ID.")
    }

    pub fn malformed(method: &str, err: impl std::fmt::Display) -> Self {
        Self::new(None, format!("unexpected {method} response: {err}"))
    }

    pub fn is_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(UNRECOGNIZED_CHAIN)
    }
}

/// Connection failures. `Display` is the banner text shown to the visitor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConnectError {
    #[error("{0} is not installed! Please install {0} browser extension to continue.")]
    NotInstalled(WalletKind),

    #[error("{} detected. Please use the {} button instead or disable {} extension.", .0.other(), .0.other(), .0.other())]
    WrongExtension(WalletKind),

    #[error("{0} not found. Please install {0} extension.")]
    NotFound(WalletKind),

    #[error("Connection rejected. Please approve the connection request in {0}.")]
    Rejected(WalletKind),

    #[error("Failed to connect to {kind}. Please try again.")]
    Provider {
        kind: WalletKind,
        #[source]
        source: ProviderError,
    },

    #[error("Failed to connect to {0}. Please try again.")]
    NoAccounts(WalletKind),

    #[error("Please switch to BSC Mainnet to add GZ Coin token.")]
    NetworkMismatch,
}

impl ConnectError {
    /// Classify a failed account or chain request.
    pub fn from_provider(kind: WalletKind, source: ProviderError) -> Self {
        if source.is_rejection() {
            ConnectError::Rejected(kind)
        } else {
            ConnectError::Provider { kind, source }
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WaitlistError {
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("storage unavailable: {0}")]
    Storage(String),
}
