//! Application-specific contract: selectors and reusable operations.

pub mod ops;
pub mod selectors;
