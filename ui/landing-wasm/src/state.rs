//! Page-wide singletons.
//!
//! WASM is single-threaded, so `thread_local!` holds the one connector and
//! waitlist for the lifetime of the page.

use gz_wallet_core::{Connector, Waitlist};
use std::cell::RefCell;
use std::rc::Rc;

use crate::injected::JsProvider;
use crate::platform::BrowserStore;
use crate::view::DomView;

pub type PageConnector = Connector<JsProvider, DomView>;

thread_local! {
    static CONNECTOR: RefCell<Option<Rc<PageConnector>>> = const { RefCell::new(None) };
    static WAITLIST: RefCell<Option<Rc<Waitlist<BrowserStore>>>> = const { RefCell::new(None) };
}

pub fn set_connector(connector: PageConnector) {
    CONNECTOR.with(|c| *c.borrow_mut() = Some(Rc::new(connector)));
}

pub fn set_waitlist(waitlist: Waitlist<BrowserStore>) {
    WAITLIST.with(|w| *w.borrow_mut() = Some(Rc::new(waitlist)));
}

pub fn connector() -> Option<Rc<PageConnector>> {
    CONNECTOR.with(|c| c.borrow().clone())
}

pub fn waitlist() -> Option<Rc<Waitlist<BrowserStore>>> {
    WAITLIST.with(|w| w.borrow().clone())
}
