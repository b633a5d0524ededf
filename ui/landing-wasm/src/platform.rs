//! Host browser facts and storage.

use gz_wallet_core::{HostInfo, KeyValueStore, WaitlistError};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::dom;

static MOBILE_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user agent pattern is valid")
});

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_UA.is_match(user_agent)
}

pub fn host_info() -> HostInfo {
    let Ok(window) = dom::window() else {
        return HostInfo::default();
    };
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let href = window.location().href().unwrap_or_default();
    HostInfo {
        mobile: is_mobile_user_agent(&user_agent),
        encoded_page_url: js_sys::encode_uri_component(&href).into(),
    }
}

/// `localStorage`, holding plain strings. Browsers that deny storage access
/// (blocked cookies, sandboxed frames) get a store that remembers nothing.
#[derive(Debug, Clone, Default)]
pub struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

impl BrowserStore {
    pub fn local() -> Self {
        let storage = local_storage();
        if storage.is_none() {
            warn!("localStorage unavailable; waitlist signups will not persist");
        }
        Self { storage }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WaitlistError> {
        let Some(storage) = &self.storage else {
            return Err(WaitlistError::Storage("localStorage unavailable".to_owned()));
        };
        storage
            .set_item(key, value)
            .map_err(|e| WaitlistError::Storage(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gz_wallet_core::Waitlist;

    #[test]
    fn mobile_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; android 14; Pixel 8)"));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36"
        ));
    }

    #[test]
    fn missing_storage_degrades_to_an_empty_store() {
        let waitlist = Waitlist::new(BrowserStore::default(), "gzcoin_waitlist_email");
        assert_eq!(waitlist.existing(), None);
        assert!(matches!(
            waitlist.join("visitor@gz.coin"),
            Err(WaitlistError::Storage(_))
        ));
        assert_eq!(waitlist.existing(), None);
    }
}
