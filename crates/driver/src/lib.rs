//! Driver-facing vocabulary for the tracker E2E suite.
//!
//! Defines what a browser session must be able to do ([`BrowserDriver`]),
//! how target elements are described ([`Locator`]), and the error taxonomy
//! shared by every driver implementation. Concrete drivers live elsewhere
//! (`tracker-cdp` for a real browser, the test suite's fake for offline runs).

pub mod driver;
pub mod error;
pub mod keys;
pub mod locator;
pub mod wait;

pub use driver::{BrowserDriver, SessionFactory};
pub use error::DriverError;
pub use keys::Key;
pub use locator::{Locator, LocatorKind, NameMatch, Nth};
pub use wait::{best_effort, poll_until, WaitOutcome};
