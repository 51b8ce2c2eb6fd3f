//! # sift
//!
//! Declarative filter trees that coerce and validate nested input.
//!
//! A tree of typed filters is declared once (through the builders) and then
//! fed arbitrary raw input. Every node coerces its part of the input to the
//! target type, runs its validation rules and reacts to missing, null,
//! invalid and empty values according to per-node [`Policy`] tokens. Feeding
//! produces an [`Outcome`]: the coerced tree, or an error tree that mirrors
//! the shape of the filter tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use sift::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::build(|s| {
//!     s.string("name", |o| o.max_length = Some(10))
//!         .string("email", |_| {})
//!         .integer("amount", |o| o.common.missing = Policy::Discard);
//! })
//! .unwrap();
//!
//! let outcome = schema.feed([json!({"name": "John", "email": "john@x.com"})]).unwrap();
//! assert!(outcome.is_success());
//! assert!(!outcome.inputs().contains_key("amount"));
//!
//! let outcome = schema.feed([json!({"name": "JohnTooLong", "email": "x"})]).unwrap();
//! let codes = outcome.errors().unwrap().codes();
//! assert_eq!(codes.get("name").and_then(ErrorShape::leaf), Some(&ErrorCode::TOO_LONG));
//! ```
//!
//! ## Layout
//!
//! - [`policy`]: the `Allow | Deny | Discard | Substitute` tokens and their resolver
//! - [`options`]: per-kind option records and the [`KindDefaults`] registry
//! - [`errors`]: the error tree (atoms, keyed maps, sparse lists) and its views
//! - [`filter`]: the [`Filter`] trait, the feed protocol and every built-in kind
//! - [`builder`]: typed and name-dispatched construction of filter trees
//! - [`schema`]: the root filter and [`Outcome`]

// `BuildError` carries regex and option diagnostics; it is only produced
// while building, never on the feed path.
#![allow(clippy::result_large_err)]

pub mod builder;
pub mod error;
pub mod errors;
pub mod filter;
mod kind;
pub mod models;
pub mod options;
pub mod outcome;
pub mod policy;
pub mod prelude;
pub mod schema;

pub use builder::{BuildContext, ElementBuilder, MapBuilder, Nested, SchemaBuilder};
pub use error::{BuildError, ConfigError, FeedError, OptionError, ValidationFailed};
pub use errors::{
    DefaultMessages, ErrorAtom, ErrorCode, ErrorList, ErrorMap, ErrorNode, ErrorShape,
    MessageFormatter,
};
pub use filter::{Coercion, FeedResult, Fed, Filter, Standalone};
pub use kind::FilterKind;
pub use models::ModelRegistry;
pub use options::{CommonOptions, KindDefaults, Overlay};
pub use outcome::Outcome;
pub use policy::Policy;
pub use schema::Schema;

pub use sift_value::{Host, HostObject, Map, Value, ValueKind};
