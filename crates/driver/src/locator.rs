//! Declarative element locators.
//!
//! A [`Locator`] describes *which* element an action targets: by accessible
//! role and name, by placeholder, by visible text, or by a raw CSS selector.
//! Locators are resolved fresh on every use: the target application
//! re-renders asynchronously, so a handle cached across actions would go
//! stale. Drivers receive the locator itself and resolve it at the moment of
//! the action.

use std::fmt;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// How an accessible name (or placeholder, or text content) is matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "kebab-case")]
pub enum NameMatch {
    /// Any name matches; used for unnamed landmarks and "the Nth combobox"
    /// style lookups.
    Any,

    /// Whole-string match after trimming, case-insensitive.
    Exact(String),

    /// Case-insensitive regular expression over the candidate name.
    Pattern(String),
}

impl NameMatch {
    pub fn exact(value: impl Into<String>) -> Self {
        NameMatch::Exact(value.into())
    }

    pub fn pattern(value: impl Into<String>) -> Self {
        NameMatch::Pattern(value.into())
    }

    /// Evaluate the match against a candidate name.
    ///
    /// Pattern sources in this suite are compile-time constants; an invalid
    /// pattern is reported once at warn level and matches nothing.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            NameMatch::Any => true,
            NameMatch::Exact(expected) => {
                // Unicode-aware lowercasing; the target UI is Cyrillic.
                candidate.trim().to_lowercase() == expected.trim().to_lowercase()
            }
            NameMatch::Pattern(pattern) => {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(re) => re.is_match(candidate.trim()),
                    Err(err) => {
                        tracing::warn!(pattern = %pattern, error = %err, "invalid name pattern");
                        false
                    }
                }
            }
        }
    }
}

impl fmt::Display for NameMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameMatch::Any => write!(f, "*"),
            NameMatch::Exact(value) => write!(f, "{:?}", value),
            NameMatch::Pattern(pattern) => write!(f, "/{}/i", pattern),
        }
    }
}

/// Locator strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LocatorKind {
    /// Accessible role plus accessible name. The preferred strategy: it
    /// survives markup reshuffles that break structural selectors.
    Role { role: String, name: NameMatch },

    /// Input placeholder text.
    Placeholder { name: NameMatch },

    /// Visible text content.
    Text { name: NameMatch },

    /// Raw CSS selector. Escape hatch for elements without an accessible
    /// identity (e.g. the MUI progress spinner).
    Css { selector: String },
}

/// Positional pick among multiple matches of the same locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "nth", content = "index", rename_all = "kebab-case")]
pub enum Nth {
    Index(usize),
    Last,
}

/// A declarative description of a target element.
///
/// `scope` restricts resolution to descendants of another locator's match
/// (e.g. "the create button inside the banner"). `nth` picks one element when
/// several share the same role and name, a deliberate, fragile compromise
/// for the target app's identically-named comboboxes; the ordinals themselves
/// live in configuration, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    #[serde(flatten)]
    pub kind: LocatorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Box<Locator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nth: Option<Nth>,
}

impl Locator {
    pub fn role(role: impl Into<String>, name: NameMatch) -> Self {
        Self::from_kind(LocatorKind::Role {
            role: role.into(),
            name,
        })
    }

    pub fn placeholder(name: NameMatch) -> Self {
        Self::from_kind(LocatorKind::Placeholder { name })
    }

    pub fn text(name: NameMatch) -> Self {
        Self::from_kind(LocatorKind::Text { name })
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_kind(LocatorKind::Css {
            selector: selector.into(),
        })
    }

    fn from_kind(kind: LocatorKind) -> Self {
        Self {
            kind,
            scope: None,
            nth: None,
        }
    }

    /// Restrict resolution to descendants of `parent`'s match.
    pub fn within(mut self, parent: Locator) -> Self {
        self.scope = Some(Box::new(parent));
        self
    }

    /// Pick the Nth match (zero-based) when several elements qualify.
    pub fn nth(mut self, index: usize) -> Self {
        self.nth = Some(Nth::Index(index));
        self
    }

    pub fn first(self) -> Self {
        self.nth(0)
    }

    pub fn last(mut self) -> Self {
        self.nth = Some(Nth::Last);
        self
    }
}

// Display is used in every error message and trace entry; keep it compact.
impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scope) = &self.scope {
            write!(f, "{} >> ", scope)?;
        }
        match &self.kind {
            LocatorKind::Role { role, name } => write!(f, "role={}[name={}]", role, name)?,
            LocatorKind::Placeholder { name } => write!(f, "placeholder={}", name)?,
            LocatorKind::Text { name } => write!(f, "text={}", name)?,
            LocatorKind::Css { selector } => write!(f, "css={}", selector)?,
        }
        match self.nth {
            Some(Nth::Index(index)) => write!(f, "[nth={}]", index),
            Some(Nth::Last) => write!(f, "[last]"),
            None => Ok(()),
        }
    }
}
