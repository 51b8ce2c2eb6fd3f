//! The error tree.
//!
//! Feeding a composite filter reports failures in a tree that mirrors the
//! filter tree: an [`ErrorMap`] for map nodes (keyed by field), a sparse
//! [`ErrorList`] for list nodes (keyed by output index) and an [`ErrorAtom`]
//! at every failing leaf. Each leaf reports at most one atom; the first
//! failing rule wins.
//!
//! The tree is data only. Text is produced lazily through the views
//! ([`ErrorNode::codes`], [`ErrorNode::messages`],
//! [`ErrorNode::flattened_messages`]) with a pluggable [`MessageFormatter`].

mod atom;
mod code;
mod messages;
mod shape;
mod tree;

pub use atom::ErrorAtom;
pub use code::ErrorCode;
pub use messages::{DefaultMessages, MessageFormatter};
pub use shape::ErrorShape;
pub use tree::{ErrorList, ErrorMap, ErrorNode};
