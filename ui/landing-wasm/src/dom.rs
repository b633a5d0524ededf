//! DOM element bindings.
//!
//! Every landing page element is optional: a page variant that leaves one out
//! simply loses the behavior attached to it.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

// ── Helpers ──

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    document()
        .ok()?
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_typed<T: JsCast>(selector: &str) -> Option<T> {
    document()
        .ok()?
        .query_selector(selector)
        .ok()?
        .and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all_typed<T: JsCast>(selector: &str) -> Vec<T> {
    let Some(list) = document().ok().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn show(el: &HtmlElement, display: &str) {
    set_style(el, "display", display);
}

pub fn hide(el: &HtmlElement) {
    set_style(el, "display", "none");
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str) {
    let _ = el.class_list().toggle(cls);
}

/// Label span inside a wallet button.
pub fn set_button_label(btn: &HtmlButtonElement, text: &str) {
    if let Ok(Some(label)) = btn.query_selector(".wallet-text") {
        set_text(&label, text);
    }
}

// ── Elements struct ──

/// Landing page element references, resolved once at startup.
#[derive(Clone, Default)]
pub struct Elements {
    // Wallet controls
    pub connect_metamask_btn: Option<HtmlButtonElement>,
    pub connect_metamask_nav: Option<HtmlButtonElement>,
    pub connect_trust_btn: Option<HtmlButtonElement>,
    pub connect_trust_nav: Option<HtmlButtonElement>,
    pub disconnect_btn: Option<HtmlElement>,

    // Wallet status
    pub wallet_status: Option<HtmlElement>,
    pub wallet_address: Option<Element>,
    pub wallet_network: Option<Element>,
    pub token_added: Option<HtmlElement>,
    pub wallet_error: Option<HtmlElement>,
    pub error_message: Option<Element>,

    // Waitlist
    pub waitlist_form: Option<HtmlElement>,
    pub success_message: Option<Element>,
    pub email_input: Option<HtmlInputElement>,

    // Navigation and effects
    pub mobile_menu_toggle: Option<Element>,
    pub nav_links: Option<Element>,
    pub navbar: Option<HtmlElement>,
    pub hero_background: Option<HtmlElement>,
    pub hero_stats: Option<Element>,
}

impl Elements {
    /// Resolve all DOM references. Call once the document is parsed.
    pub fn bind() -> Elements {
        Elements {
            connect_metamask_btn: by_id_typed("connectWalletBtn"),
            connect_metamask_nav: by_id_typed("connectWalletNav"),
            connect_trust_btn: by_id_typed("connectTrustBtn"),
            connect_trust_nav: by_id_typed("connectTrustNav"),
            disconnect_btn: by_id_typed("disconnectBtn"),

            wallet_status: by_id_typed("walletStatus"),
            wallet_address: by_id_typed("walletAddress"),
            wallet_network: by_id_typed("walletNetwork"),
            token_added: by_id_typed("tokenAdded"),
            wallet_error: by_id_typed("walletError"),
            error_message: by_id_typed("errorMessage"),

            waitlist_form: by_id_typed("waitlistForm"),
            success_message: by_id_typed("successMessage"),
            email_input: by_id_typed("emailInput"),

            mobile_menu_toggle: query_typed(".mobile-menu-toggle"),
            nav_links: query_typed(".nav-links"),
            navbar: query_typed(".navbar"),
            hero_background: query_typed(".hero-background"),
            hero_stats: query_typed(".hero-stats"),
        }
    }
}
