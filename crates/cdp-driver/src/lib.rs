//! Chromium-backed implementation of the [`tracker_driver::BrowserDriver`]
//! capability, built on `chromiumoxide`.
//!
//! One [`CdpBrowser`] is launched per suite run; each scenario gets its own
//! page session via the [`tracker_driver::SessionFactory`] impl. Locators are
//! resolved by evaluating a small JavaScript runtime in the page (see
//! [`eval`]) that mirrors the locator semantics on the DOM.

pub mod browser;
pub mod eval;
pub mod session;

pub use browser::{CdpBrowser, CdpBrowserConfig};
pub use session::CdpSession;
