//! Wallet connection flow.
//!
//! `Connector` owns the page's single [`Session`] and renders every change it
//! reports onto a [`WalletView`]. Explicit connects, the load-time restore and
//! provider push events all funnel through [`Connector::apply`].

use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use gz_api_types::{WalletKind, network_name};
use std::cell::{Ref, RefCell};
use tracing::{debug, error, info, warn};

use crate::config::LandingConfig;
use crate::error::{ConnectError, ProviderError};
use crate::format::format_address;
use crate::provider::{Eip1193Provider, EventSender, ProviderEvent, ProviderExt};
use crate::resolve::{InjectedEnvironment, Resolution, resolve};
use crate::session::{Session, SessionChange, SessionUpdate};
use crate::view::WalletView;

pub const DEEP_LINK_NOTICE: &str = "Redirecting to Trust Wallet mobile app...";

/// Facts about the host page the connector cannot observe itself.
#[derive(Debug, Clone, Default)]
pub struct HostInfo {
    pub mobile: bool,
    /// Current page URL, URI-component encoded.
    pub encoded_page_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected { account: String, token_added: bool },
    /// Sent to the wallet's mobile app; the page is about to navigate away.
    Redirected,
}

pub struct Connector<P, V> {
    config: RefCell<LandingConfig>,
    view: V,
    session: RefCell<Session<P>>,
}

impl<P, V> Connector<P, V>
where
    P: Eip1193Provider + Clone,
    V: WalletView,
{
    pub fn new(config: LandingConfig, view: V) -> Self {
        Self {
            config: RefCell::new(config),
            view,
            session: RefCell::new(Session::default()),
        }
    }

    pub fn config(&self) -> LandingConfig {
        self.config.borrow().clone()
    }

    /// Swap in new settings. The session, and any connect in flight, is untouched.
    pub fn reconfigure(&self, config: LandingConfig) {
        *self.config.borrow_mut() = config;
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn session(&self) -> Ref<'_, Session<P>> {
        self.session.borrow()
    }

    /// Apply one update to the session and render the result.
    pub fn apply(&self, update: SessionUpdate<P>) -> SessionChange {
        let change = self.session.borrow_mut().apply(update);
        self.render(&change);
        change
    }

    fn render(&self, change: &SessionChange) {
        match change {
            SessionChange::Unchanged => {}
            SessionChange::Connecting(kind) => self.view.set_connecting(*kind),
            SessionChange::Connected { kind, account } => {
                let short = format_address(account);
                let network = self.session.borrow().chain_id().map(network_name);
                self.view.show_status(&short, network.as_deref());
                self.view.set_connected(*kind, &short);
            }
            SessionChange::Network(chain_id) => self.view.update_network(&network_name(chain_id)),
            SessionChange::Failed(_) | SessionChange::Cleared => {
                self.view.reset_controls();
                self.view.hide_status();
                self.view.hide_token_added();
            }
        }
    }

    /// Connect `kind`: resolve a provider, request accounts, move the wallet to
    /// the target network and ask it to show the token.
    pub async fn connect(
        &self,
        kind: WalletKind,
        env: &InjectedEnvironment<P>,
        host: &HostInfo,
    ) -> Result<ConnectOutcome, ConnectError> {
        let config = self.config();
        let provider = match resolve(env, kind, host.mobile) {
            Resolution::Provider(p) => p,
            Resolution::DeepLink => {
                info!(?kind, "redirecting to mobile app");
                self.view.show_error(DEEP_LINK_NOTICE);
                let link = config.trust_deep_link(&host.encoded_page_url);
                self.view.redirect(&link, config.deep_link_delay_ms);
                return Ok(ConnectOutcome::Redirected);
            }
            Resolution::InstallPrompt => {
                let err = ConnectError::NotInstalled(kind);
                self.view.show_error(&err.to_string());
                self.view
                    .open_tab(config.download_url(kind), config.install_prompt_delay_ms);
                return Err(err);
            }
            Resolution::Refused(err) => {
                warn!(?kind, %err, "connect refused");
                self.view.show_error(&err.to_string());
                return Err(err);
            }
        };

        self.view.hide_error();
        self.apply(SessionUpdate::Connecting(kind));

        let account = match provider.request_accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => account,
                None => return Err(self.fail(kind, ConnectError::NoAccounts(kind))),
            },
            Err(e) => return Err(self.fail(kind, ConnectError::from_provider(kind, e))),
        };
        self.apply(SessionUpdate::Granted {
            kind,
            account: account.clone(),
            provider: provider.clone(),
        });
        info!(?kind, account = %account, "wallet connected");

        let chain_id = match provider.chain_id().await {
            Ok(id) => id,
            Err(e) => return Err(self.fail(kind, ConnectError::from_provider(kind, e))),
        };
        self.apply(SessionUpdate::ChainChanged(chain_id.clone()));

        if chain_id != config.network.chain_id && !self.ensure_network(&provider, &config).await {
            let err = ConnectError::NetworkMismatch;
            self.view.show_error(&err.to_string());
            return Err(err);
        }

        let token_added = self.add_token(&provider, &config).await;
        Ok(ConnectOutcome::Connected {
            account,
            token_added,
        })
    }

    fn fail(&self, kind: WalletKind, err: ConnectError) -> ConnectError {
        error!(?kind, %err, "connect failed");
        self.apply(SessionUpdate::Failed(kind));
        self.view.show_error(&err.to_string());
        err
    }

    /// Switch to the target network, registering it first when the wallet
    /// does not know it. Returns whether the wallet ended up on it.
    async fn ensure_network(&self, provider: &P, config: &LandingConfig) -> bool {
        let target = &config.network;
        let switched = match provider.switch_chain(&target.chain_id).await {
            Ok(()) => true,
            Err(e) if e.is_unrecognized_chain() => match provider.add_chain(target).await {
                Ok(()) => true,
                Err(e) => {
                    log_provider_error("add chain failed", &e);
                    false
                }
            },
            Err(e) if e.is_rejection() => {
                info!("network switch rejected");
                false
            }
            Err(e) => {
                log_provider_error("network switch failed", &e);
                false
            }
        };
        if switched {
            self.apply(SessionUpdate::ChainChanged(target.chain_id.clone()));
        }
        switched
    }

    async fn add_token(&self, provider: &P, config: &LandingConfig) -> bool {
        match provider.watch_asset(&config.token).await {
            Ok(true) => {
                info!(symbol = %config.token.symbol, "token added to wallet");
                self.view.show_token_added(config.token_notice_ms);
                true
            }
            Ok(false) => {
                debug!("token not added");
                false
            }
            Err(e) => {
                log_provider_error("watch asset failed", &e);
                false
            }
        }
    }

    /// Local disconnect. The wallet itself is never told.
    pub fn disconnect(&self) -> SessionChange {
        info!("wallet disconnected");
        self.apply(SessionUpdate::Disconnect)
    }

    /// Subscribe to `injected`'s events and restore a session the wallet
    /// already authorized for this page, without prompting.
    pub async fn attach(&self, injected: &P, events: EventSender) {
        if let Err(e) = injected.subscribe(events) {
            warn!(error = %e, "could not subscribe to provider events");
        }

        let accounts = match injected.accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                log_provider_error("account check failed", &e);
                return;
            }
        };
        if accounts.is_empty() {
            return;
        }

        self.apply(SessionUpdate::Detected {
            kind: injected.flags().detected_kind(),
            provider: injected.clone(),
        });
        self.apply(SessionUpdate::AccountsChanged(accounts));
        match injected.chain_id().await {
            Ok(chain_id) => {
                self.apply(SessionUpdate::ChainChanged(chain_id));
            }
            Err(e) => log_provider_error("chain id check failed", &e),
        }
    }

    /// Drain provider events in arrival order until every sender is gone.
    pub async fn run_events(&self, mut events: UnboundedReceiver<ProviderEvent>) {
        while let Some(event) = events.next().await {
            debug!(?event, "provider event");
            let update = match event {
                ProviderEvent::AccountsChanged(accounts) => SessionUpdate::AccountsChanged(accounts),
                ProviderEvent::ChainChanged(chain_id) => SessionUpdate::ChainChanged(chain_id),
            };
            self.apply(update);
        }
    }
}

fn log_provider_error(what: &str, e: &ProviderError) {
    error!(code = ?e.code, message = %e.message, data = ?e.data, "{what}");
}
