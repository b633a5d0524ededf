//! Event binding.
//!
//! Wires the wallet controls, navigation and waitlist form. Async work is
//! spawned via `wasm_bindgen_futures::spawn_local`.

use gz_api_types::WalletKind;
use gz_wallet_core::{FieldHint, WaitlistError};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::dom::{self, Elements};
use crate::injected;
use crate::platform;
use crate::state;

/// Helper: attach an event handler to an event target.
macro_rules! on {
    ($el:expr, $event:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::Event)>);
        let target: &EventTarget = $el.as_ref();
        target.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all page event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    // ── Wallet controls ──
    for (btn, kind) in [
        (&els.connect_metamask_btn, WalletKind::MetaMask),
        (&els.connect_metamask_nav, WalletKind::MetaMask),
        (&els.connect_trust_btn, WalletKind::Trust),
        (&els.connect_trust_nav, WalletKind::Trust),
    ] {
        if let Some(btn) = btn {
            on!(btn, "click", move |_: web_sys::Event| on_connect(kind));
        }
    }
    if let Some(btn) = &els.disconnect_btn {
        on!(btn, "click", move |_: web_sys::Event| {
            if let Some(connector) = state::connector() {
                connector.disconnect();
            }
        });
    }

    bind_menu(els)?;
    bind_smooth_scroll(els)?;
    bind_waitlist(els)?;
    Ok(())
}

fn on_connect(kind: WalletKind) {
    let Some(connector) = state::connector() else {
        warn!("connect clicked before startup finished");
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        info!(?kind, "connecting");
        let env = injected::environment();
        let host = platform::host_info();
        match connector.connect(kind, &env, &host).await {
            Ok(outcome) => debug!(?outcome, "connect finished"),
            Err(e) => debug!(%e, "connect stopped"),
        }
    });
}

// ── Mobile menu ──

fn bind_menu(els: &Elements) -> Result<(), JsValue> {
    let (Some(toggle), Some(links)) = (els.mobile_menu_toggle.clone(), els.nav_links.clone()) else {
        return Ok(());
    };
    {
        let (toggle2, links2) = (toggle.clone(), links.clone());
        on!(toggle, "click", move |_: web_sys::Event| {
            dom::toggle_class(&links2, "active");
            dom::toggle_class(&toggle2, "active");
        });
    }
    for link in dom::query_all_typed::<Element>(".nav-links a") {
        let (toggle2, links2) = (toggle.clone(), links.clone());
        on!(link, "click", move |_: web_sys::Event| {
            dom::remove_class(&links2, "active");
            dom::remove_class(&toggle2, "active");
        });
    }
    Ok(())
}

// ── Smooth scrolling ──

fn bind_smooth_scroll(els: &Elements) -> Result<(), JsValue> {
    for anchor in dom::query_all_typed::<Element>("a[href^=\"#\"]") {
        let navbar = els.navbar.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        on!(anchor, "click", move |e: web_sys::Event| {
            e.prevent_default();
            let Some(target) = dom::query_typed::<Element>(&href) else {
                return;
            };
            let Ok(window) = dom::window() else {
                return;
            };
            let navbar_height = navbar.as_ref().map_or(0, HtmlElement::offset_height);
            let top = target.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0)
                - f64::from(navbar_height);
            let opts = ScrollToOptions::new();
            opts.set_top(top);
            opts.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&opts);
        });
    }
    Ok(())
}

// ── Waitlist ──

/// Show the success state if this browser already joined.
pub fn restore_waitlist(els: &Elements) {
    if let Some(email) = state::waitlist().and_then(|w| w.existing()) {
        debug!(%email, "already on the waitlist");
        show_waitlist_success(els);
    }
}

fn bind_waitlist(els: &Elements) -> Result<(), JsValue> {
    restore_waitlist(els);

    if let Some(form) = &els.waitlist_form {
        let els2 = els.clone();
        on!(form, "submit", move |e: web_sys::Event| {
            e.prevent_default();
            let (Some(waitlist), Some(input)) = (state::waitlist(), &els2.email_input) else {
                return;
            };
            match waitlist.join(&input.value()) {
                Ok(_) => show_waitlist_success(&els2),
                Err(err @ WaitlistError::Storage(_)) => {
                    warn!(%err, "waitlist signup not persisted");
                    show_waitlist_success(&els2);
                }
                Err(err) => {
                    warn!(%err, "waitlist signup refused");
                    dom::set_style(input, "border-color", FieldHint::Invalid.border_color());
                }
            }
        });
    }

    if let Some(input) = &els.email_input {
        let input2 = input.clone();
        on!(input, "input", move |_: web_sys::Event| {
            let hint = FieldHint::for_input(&input2.value());
            dom::set_style(&input2, "border-color", hint.border_color());
        });
    }
    Ok(())
}

fn show_waitlist_success(els: &Elements) {
    if let (Some(form), Some(success)) = (&els.waitlist_form, &els.success_message) {
        dom::hide(form);
        dom::add_class(success, "show");
    }
}
