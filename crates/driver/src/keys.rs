//! Keyboard keys the scenarios press.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The small set of keys the suite actually sends. Values follow the DOM
/// `KeyboardEvent.key` names so drivers can pass them through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Tab,
}

impl Key {
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Escape => "Escape",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
        }
    }

    /// Windows virtual key code, required by the CDP key event dispatch.
    pub fn windows_virtual_key_code(&self) -> i64 {
        match self {
            Key::Escape => 27,
            Key::Enter => 13,
            Key::Tab => 9,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
