//! EIP-1193 adapter over the wallet objects extensions inject into `window`.

use async_trait::async_trait;
use gz_api_types::event;
use gz_wallet_core::{Eip1193Provider, EventSender, InjectedEnvironment, ProviderError, ProviderEvent, ProviderFlags};
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Array, Function, Promise, Reflect};
use serde_json::{Value, json};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom;

#[derive(Debug, Clone)]
pub struct JsProvider {
    object: JsValue,
}

impl JsProvider {
    pub fn new(object: JsValue) -> Self {
        Self { object }
    }

    fn get(&self, name: &str) -> Option<JsValue> {
        Reflect::get(&self.object, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    }

    fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| v.is_truthy())
    }

    fn function(&self, name: &str) -> Result<Function, ProviderError> {
        self.get(name)
            .and_then(|v| v.dyn_into::<Function>().ok())
            .ok_or_else(|| ProviderError::new(None, format!("provider has no {name}()")))
    }

    fn on(&self, name: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<(), ProviderError> {
        self.function("on")?
            .call2(&self.object, &JsValue::from_str(name), handler.as_ref().unchecked_ref())
            .map(drop)
            .map_err(decode_error)
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for JsProvider {
    fn flags(&self) -> ProviderFlags {
        ProviderFlags {
            is_metamask: self.flag("isMetaMask"),
            is_trust: self.flag("isTrust"),
        }
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ProviderError> {
        let args = match params {
            Some(params) => json!({ "method": method, "params": params }),
            None => json!({ "method": method }),
        };
        let args = JsValue::from_serde(&args).map_err(|e| ProviderError::malformed(method, e))?;

        let pending = self
            .function("request")?
            .call1(&self.object, &args)
            .map_err(decode_error)?;
        let result = JsFuture::from(Promise::resolve(&pending))
            .await
            .map_err(decode_error)?;

        if result.is_undefined() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result).map_err(|e| ProviderError::malformed(method, e))
    }

    fn subscribe(&self, events: EventSender) -> Result<(), ProviderError> {
        let tx = events.clone();
        let accounts = Closure::wrap(Box::new(move |value: JsValue| {
            forward(&tx, event::ACCOUNTS_CHANGED, value, ProviderEvent::accounts_changed);
        }) as Box<dyn FnMut(JsValue)>);
        self.on(event::ACCOUNTS_CHANGED, &accounts)?;
        accounts.forget();

        let chain = Closure::wrap(Box::new(move |value: JsValue| {
            forward(&events, event::CHAIN_CHANGED, value, ProviderEvent::chain_changed);
        }) as Box<dyn FnMut(JsValue)>);
        self.on(event::CHAIN_CHANGED, &chain)?;
        chain.forget();
        Ok(())
    }
}

/// Decode an event payload and queue it. Malformed payloads are logged and dropped.
fn forward(
    events: &EventSender,
    name: &str,
    value: JsValue,
    decode: fn(Value) -> Result<ProviderEvent, ProviderError>,
) {
    let decoded = serde_wasm_bindgen::from_value::<Value>(value)
        .map_err(|e| ProviderError::malformed(name, e))
        .and_then(decode);
    match decoded {
        Ok(decoded) => {
            let _ = events.unbounded_send(decoded);
        }
        Err(e) => warn!(event_name = name, error = %e, "dropping malformed provider event"),
    }
}

/// Decode a rejected request into code, message and data.
fn decode_error(err: JsValue) -> ProviderError {
    let field = |name: &str| {
        Reflect::get(&err, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    };
    let code = field("code").and_then(|v| v.as_f64()).map(|c| c as i64);
    let message = field("message")
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown provider error".to_owned());
    let data = field("data").and_then(|v| serde_wasm_bindgen::from_value(v).ok());
    ProviderError {
        code,
        message,
        data,
    }
}

fn global(window: &JsValue, name: &str) -> Option<JsProvider> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|v| v.is_object())
        .map(JsProvider::new)
}

/// Snapshot of `window.ethereum`, its `providers` list and `window.trustwallet`.
pub fn environment() -> InjectedEnvironment<JsProvider> {
    let Ok(window) = dom::window() else {
        return InjectedEnvironment::default();
    };
    let window: JsValue = window.into();
    let injected = global(&window, "ethereum");
    let providers = injected
        .as_ref()
        .and_then(|p| p.get("providers"))
        .filter(Array::is_array)
        .map(|list| Array::from(&list))
        .filter(|list| list.length() > 0)
        .map(|list| list.iter().map(JsProvider::new).collect());

    InjectedEnvironment {
        injected,
        providers,
        trust_fallback: global(&window, "trustwallet"),
    }
}
