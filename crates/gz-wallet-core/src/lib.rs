//! GZ Coin landing page logic that does not depend on the browser.
//!
//! The wasm frontend supplies an [`Eip1193Provider`] over the injected wallet
//! object and a [`WalletView`] over the DOM; everything else lives here.

pub mod config;
pub mod connector;
pub mod error;
pub mod format;
pub mod provider;
pub mod resolve;
pub mod session;
pub mod view;
pub mod waitlist;

#[cfg(test)]
mod testing;

pub use config::LandingConfig;
pub use connector::{ConnectOutcome, Connector, HostInfo};
pub use error::{ConnectError, ProviderError, WaitlistError};
pub use provider::{Eip1193Provider, EventSender, ProviderEvent, ProviderExt, ProviderFlags};
pub use resolve::{InjectedEnvironment, Resolution};
pub use session::{ControlState, Session, SessionChange, SessionUpdate};
pub use view::WalletView;
pub use waitlist::{FieldHint, KeyValueStore, Waitlist};
