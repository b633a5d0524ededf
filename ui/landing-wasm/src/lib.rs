//! GZ Coin landing page WASM frontend.
//!
//! Binds the page's DOM, adapts the injected wallet object to the core
//! connector and runs the cosmetic page effects.

pub mod dom;
pub mod effects;
pub mod events;
pub mod injected;
pub mod logging;
pub mod platform;
pub mod state;
pub mod view;

use futures::channel::mpsc;
use gz_wallet_core::{Connector, LandingConfig, Waitlist};
use tracing::info;
use wasm_bindgen::prelude::*;

use crate::dom::Elements;
use crate::platform::BrowserStore;
use crate::view::DomView;

/// WASM entry point, called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init("info");
    init(LandingConfig::default())
}

/// Apply overrides, e.g. `startWithConfig({ tokenNoticeMs: 5000 })`. Missing
/// fields keep their defaults. After the automatic start this only swaps the
/// settings; listeners and the wallet session stay as they are.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: LandingConfig = if config.is_undefined() || config.is_null() {
        LandingConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let Some(connector) = state::connector() else {
        return init(config);
    };
    info!("landing config replaced");
    state::set_waitlist(Waitlist::new(BrowserStore::local(), config.waitlist_key.clone()));
    connector.reconfigure(config);
    events::restore_waitlist(&Elements::bind());
    Ok(())
}

/// Main initialisation sequence.
fn init(config: LandingConfig) -> Result<(), JsValue> {
    effects::console_banner("BSC Mainnet", &config.token.address);

    let els = Elements::bind();
    state::set_waitlist(Waitlist::new(BrowserStore::local(), config.waitlist_key.clone()));
    state::set_connector(Connector::new(config, DomView::new(els.clone())));

    events::bind_events(&els)?;
    effects::bind_effects(&els)?;

    let Some(connector) = state::connector() else {
        return Ok(());
    };
    let (tx, rx) = mpsc::unbounded();
    if let Some(injected) = injected::environment().injected {
        let restoring = connector.clone();
        wasm_bindgen_futures::spawn_local(async move {
            restoring.attach(&injected, tx).await;
        });
    } else {
        info!("no injected wallet at load");
    }
    wasm_bindgen_futures::spawn_local(async move {
        connector.run_events(rx).await;
    });
    Ok(())
}
