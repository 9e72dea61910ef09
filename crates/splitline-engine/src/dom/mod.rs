//! Minimal document tree the splitter mutates.
//!
//! The tree is an arena of element and text nodes. It offers just what text
//! splitting needs: creation, batch attach/replace with identity-preserving
//! moves, attributes, text content, selector queries and HTML serialization.

pub mod document;
mod html;
pub mod selector;

pub use document::{Descendants, Document, ElementData, NodeId, NodeKind};
pub use selector::{Selector, SelectorError};
