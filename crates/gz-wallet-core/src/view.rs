//! Rendering surface the connector drives.
//!
//! The browser frontend renders these onto DOM elements; tests record them.

use gz_api_types::WalletKind;

pub trait WalletView {
    /// Disable the kind's controls and label them as connecting.
    fn set_connecting(&self, kind: WalletKind);

    /// Hide the hero connect buttons and show `short_address` on the kind's nav control.
    fn set_connected(&self, kind: WalletKind, short_address: &str);

    /// Every control back to its enabled default label.
    fn reset_controls(&self);

    fn show_status(&self, short_address: &str, network: Option<&str>);
    fn update_network(&self, network: &str);
    fn hide_status(&self);

    fn show_error(&self, message: &str);
    fn hide_error(&self);

    /// Show the token-added notice, dismissing it after `dismiss_after_ms`.
    fn show_token_added(&self, dismiss_after_ms: u32);
    fn hide_token_added(&self);

    /// Navigate the current tab to `url` after `delay_ms`.
    fn redirect(&self, url: &str, delay_ms: u32);

    /// Open `url` in a new tab after `delay_ms`.
    fn open_tab(&self, url: &str, delay_ms: u32);
}
