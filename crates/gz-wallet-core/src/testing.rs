//! Fakes shared by the unit tests: a scripted provider and a recording view.

use async_trait::async_trait;
use gz_api_types::WalletKind;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::ProviderError;
use crate::provider::{Eip1193Provider, EventSender, ProviderFlags};
use crate::view::WalletView;

type Call = (String, Option<Value>);

#[derive(Debug, Default)]
struct FakeInner {
    responses: HashMap<String, VecDeque<Result<Value, ProviderError>>>,
    calls: Vec<Call>,
    subscribers: Vec<EventSender>,
}

/// Provider answering each method from a per-method queue. Unscripted
/// methods fail with a generic error.
#[derive(Debug, Clone)]
pub struct FakeProvider {
    id: &'static str,
    flags: ProviderFlags,
    inner: Rc<RefCell<FakeInner>>,
}

impl FakeProvider {
    pub fn new(flags: ProviderFlags) -> Self {
        Self::named("fake", flags)
    }

    pub fn named(id: &'static str, flags: ProviderFlags) -> Self {
        Self {
            id,
            flags,
            inner: Rc::default(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn respond(&self, method: &str, response: Result<Value, ProviderError>) -> &Self {
        self.inner
            .borrow_mut()
            .responses
            .entry(method.to_owned())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(m, _)| m).collect()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for FakeProvider {
    fn flags(&self) -> ProviderFlags {
        self.flags
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push((method.to_owned(), params));
        inner
            .responses
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ProviderError::new(Some(-32601), format!("{method} not scripted"))))
    }

    fn subscribe(&self, events: EventSender) -> Result<(), ProviderError> {
        self.inner.borrow_mut().subscribers.push(events);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Connecting(WalletKind),
    Connected(WalletKind, String),
    ResetControls,
    ShowStatus(String, Option<String>),
    UpdateNetwork(String),
    HideStatus,
    ShowError(String),
    HideError,
    ShowTokenAdded(u32),
    HideTokenAdded,
    Redirect(String, u32),
    OpenTab(String, u32),
}

#[derive(Clone, Default)]
pub struct RecordingView {
    calls: Rc<RefCell<Vec<ViewCall>>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::ShowError(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push(&self, call: ViewCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl WalletView for RecordingView {
    fn set_connecting(&self, kind: WalletKind) {
        self.push(ViewCall::Connecting(kind));
    }

    fn set_connected(&self, kind: WalletKind, short_address: &str) {
        self.push(ViewCall::Connected(kind, short_address.to_owned()));
    }

    fn reset_controls(&self) {
        self.push(ViewCall::ResetControls);
    }

    fn show_status(&self, short_address: &str, network: Option<&str>) {
        self.push(ViewCall::ShowStatus(
            short_address.to_owned(),
            network.map(str::to_owned),
        ));
    }

    fn update_network(&self, network: &str) {
        self.push(ViewCall::UpdateNetwork(network.to_owned()));
    }

    fn hide_status(&self) {
        self.push(ViewCall::HideStatus);
    }

    fn show_error(&self, message: &str) {
        self.push(ViewCall::ShowError(message.to_owned()));
    }

    fn hide_error(&self) {
        self.push(ViewCall::HideError);
    }

    fn show_token_added(&self, dismiss_after_ms: u32) {
        self.push(ViewCall::ShowTokenAdded(dismiss_after_ms));
    }

    fn hide_token_added(&self) {
        self.push(ViewCall::HideTokenAdded);
    }

    fn redirect(&self, url: &str, delay_ms: u32) {
        self.push(ViewCall::Redirect(url.to_owned(), delay_ms));
    }

    fn open_tab(&self, url: &str, delay_ms: u32) {
        self.push(ViewCall::OpenTab(url.to_owned(), delay_ms));
    }
}
