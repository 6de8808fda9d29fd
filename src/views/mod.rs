//! Cached views.
//!
//! Local, structured snapshots of host collections. A view is read from the
//! host once, edited in memory, and written back only by an explicit `flush`.
//! Two views over the same host object do not see each other's edits; the
//! last flush wins.

mod attributes;
mod html;
mod tokens;

pub use attributes::{Attribute, AttributeMap};
pub use tokens::TokenList;

/// Canonical form of a token or attribute name.
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
