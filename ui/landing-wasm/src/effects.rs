//! Cosmetic page behavior: navbar styling, parallax, fade-ins, stat counters.

use gloo_timers::future::TimeoutFuture;
use gz_wallet_core::format::{COUNTER_FRAME_MS, CounterFrames};
use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::{self, Elements};

const NAVBAR_SCROLL_THRESHOLD: f64 = 100.0;
const PARALLAX_RATE: f64 = 0.5;

pub fn bind_effects(els: &Elements) -> Result<(), JsValue> {
    bind_scroll(els)?;
    bind_fade_in()?;
    bind_counters(els)?;
    Ok(())
}

/// Navbar background and hero parallax, both driven by the scroll offset.
fn bind_scroll(els: &Elements) -> Result<(), JsValue> {
    let window = dom::window()?;
    let navbar = els.navbar.clone();
    let hero_background = els.hero_background.clone();
    let win = window.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let scrolled = win.scroll_y().unwrap_or(0.0);
        if let Some(navbar) = &navbar {
            let (background, shadow) = if scrolled > NAVBAR_SCROLL_THRESHOLD {
                ("rgba(0, 0, 0, 0.98)", "0 2px 20px rgba(0, 217, 255, 0.1)")
            } else {
                ("rgba(0, 0, 0, 0.95)", "none")
            };
            dom::set_style(navbar, "background", background);
            dom::set_style(navbar, "box-shadow", shadow);
        }
        if let Some(hero) = &hero_background {
            let offset = scrolled * PARALLAX_RATE;
            dom::set_style(hero, "transform", &format!("translateY({offset}px)"));
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn observer(
    options: &IntersectionObserverInit,
    on_visible: impl Fn(Element, &IntersectionObserver) + 'static,
) -> Result<IntersectionObserver, JsValue> {
    let cb = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                on_visible(entry.target(), &observer);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);
    let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), options)?;
    cb.forget();
    Ok(observer)
}

/// Impact cards and feature items slide in when they scroll into view.
fn bind_fade_in() -> Result<(), JsValue> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    options.set_root_margin("0px 0px -50px 0px");
    let fade = observer(&options, |target, _| {
        if let Ok(el) = target.dyn_into::<HtmlElement>() {
            dom::set_style(&el, "opacity", "1");
            dom::set_style(&el, "transform", "translateY(0)");
        }
    })?;

    for el in dom::query_all_typed::<HtmlElement>(".impact-card, .feature-item") {
        dom::set_style(&el, "opacity", "0");
        dom::set_style(&el, "transform", "translateY(30px)");
        dom::set_style(&el, "transition", "opacity 0.6s ease-out, transform 0.6s ease-out");
        fade.observe(&el);
    }
    for (index, card) in dom::query_all_typed::<HtmlElement>(".impact-card")
        .iter()
        .enumerate()
    {
        let delay = index as f64 * 0.1;
        dom::set_style(card, "transition-delay", &format!("{delay}s"));
    }
    Ok(())
}

/// Hero stats count up once, the first time they are half visible.
fn bind_counters(els: &Elements) -> Result<(), JsValue> {
    let Some(stats) = &els.hero_stats else {
        return Ok(());
    };
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.5));
    let counters = observer(&options, |target, observer| {
        if let Ok(list) = target.query_selector_all(".stat-number") {
            for el in (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|n| n.dyn_into::<Element>().ok())
            {
                animate_counter(el);
            }
        }
        observer.unobserve(&target);
    })?;
    counters.observe(stats);
    Ok(())
}

fn animate_counter(el: Element) {
    let raw = el.get_attribute("data-target").unwrap_or_default();
    let Ok(target) = raw.trim().parse::<u64>() else {
        warn!(%raw, "stat counter without a numeric data-target");
        return;
    };
    debug!(value = target, "animating counter");
    wasm_bindgen_futures::spawn_local(async move {
        for label in CounterFrames::new(target) {
            TimeoutFuture::new(COUNTER_FRAME_MS).await;
            dom::set_text(&el, &label);
        }
    });
}

/// Styled startup banner for visitors who open the console.
pub fn console_banner(network: &str, contract: &str) {
    gloo_console::log!(
        "%c🌍 GZ Coin - Coming Soon!",
        "color: #00d9ff; font-size: 20px; font-weight: bold;"
    );
    gloo_console::log!(
        "%cEvery line of code makes a difference. Join us in creating meaningful impact.",
        "color: #00ff88; font-size: 14px;"
    );
    gloo_console::log!(
        "%c🚀 Be the first to know when we launch - join our waitlist!",
        "color: #00d9ff; font-size: 14px;"
    );
    gloo_console::log!(
        "%c🦊 Connect MetaMask or 🛡️ Trust Wallet to add GZ Coin (BEP20) token on BSC!",
        "color: #ff922b; font-size: 14px;"
    );
    gloo_console::log!(
        format!("%c⚡ Network: {network} | Contract: {contract}"),
        "color: #f0b90b; font-size: 12px;"
    );
}
