//! DOM rendering of wallet state.

use gloo_timers::callback::Timeout;
use gz_api_types::WalletKind;
use gz_wallet_core::WalletView;
use tracing::warn;

use crate::dom::{self, Elements};

const HERO_DISPLAY: &str = "inline-flex";

pub struct DomView {
    els: Elements,
}

impl DomView {
    pub fn new(els: Elements) -> Self {
        Self { els }
    }

    fn controls(&self, kind: WalletKind) -> [Option<&web_sys::HtmlButtonElement>; 2] {
        match kind {
            WalletKind::MetaMask => [
                self.els.connect_metamask_btn.as_ref(),
                self.els.connect_metamask_nav.as_ref(),
            ],
            WalletKind::Trust => [
                self.els.connect_trust_btn.as_ref(),
                self.els.connect_trust_nav.as_ref(),
            ],
        }
    }

    fn nav(&self, kind: WalletKind) -> Option<&web_sys::HtmlButtonElement> {
        self.controls(kind)[1]
    }
}

fn hero_label(kind: WalletKind) -> &'static str {
    match kind {
        WalletKind::MetaMask => "Connect MetaMask",
        WalletKind::Trust => "Connect Trust Wallet",
    }
}

fn nav_label(kind: WalletKind) -> &'static str {
    match kind {
        WalletKind::MetaMask => "MetaMask",
        WalletKind::Trust => "Trust",
    }
}

impl WalletView for DomView {
    fn set_connecting(&self, kind: WalletKind) {
        for btn in self.controls(kind).into_iter().flatten() {
            btn.set_disabled(true);
            dom::set_button_label(btn, "Connecting...");
        }
    }

    fn set_connected(&self, kind: WalletKind, short_address: &str) {
        for kind in WalletKind::ALL {
            if let Some(hero) = self.controls(kind)[0] {
                dom::hide(hero);
            }
        }
        if let Some(nav) = self.nav(kind) {
            dom::add_class(nav, "connected");
            dom::set_button_label(nav, short_address);
        }
    }

    fn reset_controls(&self) {
        for kind in WalletKind::ALL {
            let [hero, nav] = self.controls(kind);
            if let Some(hero) = hero {
                hero.set_disabled(false);
                dom::show(hero, HERO_DISPLAY);
                dom::set_button_label(hero, hero_label(kind));
            }
            if let Some(nav) = nav {
                nav.set_disabled(false);
                dom::remove_class(nav, "connected");
                dom::set_button_label(nav, nav_label(kind));
            }
        }
    }

    fn show_status(&self, short_address: &str, network: Option<&str>) {
        if let Some(el) = &self.els.wallet_address {
            dom::set_text(el, &format!("Address: {short_address}"));
        }
        if let Some(network) = network {
            self.update_network(network);
        }
        if let Some(status) = &self.els.wallet_status {
            dom::show(status, "flex");
        }
    }

    fn update_network(&self, network: &str) {
        if let Some(el) = &self.els.wallet_network {
            dom::set_text(el, &format!("Network: {network}"));
        }
    }

    fn hide_status(&self) {
        if let Some(status) = &self.els.wallet_status {
            dom::hide(status);
        }
    }

    fn show_error(&self, message: &str) {
        if let (Some(banner), Some(text)) = (&self.els.wallet_error, &self.els.error_message) {
            dom::set_text(text, message);
            dom::show(banner, "block");
        }
    }

    fn hide_error(&self) {
        if let Some(banner) = &self.els.wallet_error {
            dom::hide(banner);
        }
    }

    fn show_token_added(&self, dismiss_after_ms: u32) {
        let Some(notice) = self.els.token_added.clone() else {
            return;
        };
        dom::show(&notice, "block");
        Timeout::new(dismiss_after_ms, move || dom::hide(&notice)).forget();
    }

    fn hide_token_added(&self) {
        if let Some(notice) = &self.els.token_added {
            dom::hide(notice);
        }
    }

    fn redirect(&self, url: &str, delay_ms: u32) {
        let url = url.to_owned();
        Timeout::new(delay_ms, move || {
            let result = dom::window().and_then(|w| w.location().set_href(&url));
            if let Err(e) = result {
                warn!(?e, "redirect failed");
            }
        })
        .forget();
    }

    fn open_tab(&self, url: &str, delay_ms: u32) {
        let url = url.to_owned();
        Timeout::new(delay_ms, move || {
            let result = dom::window().and_then(|w| w.open_with_url_and_target(&url, "_blank"));
            if let Err(e) = result {
                warn!(?e, "could not open {url}");
            }
        })
        .forget();
    }
}
