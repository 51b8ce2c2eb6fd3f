//! Prelude module for convenient imports.
//!
//! `use sift::prelude::*;` brings in everything needed to declare, feed and
//! inspect a schema.
//!
//! ```rust
//! use sift::prelude::*;
//!
//! let schema = Schema::build(|s| {
//!     s.list("ids", |_| {}, |el| {
//!         el.integer(|o| o.common.invalid = Policy::Discard);
//!     });
//! })
//! .unwrap();
//!
//! let outcome = schema.feed([serde_json::json!({"ids": [1, "x", "3"]})]).unwrap();
//! assert_eq!(outcome.inputs()["ids"], Value::from(vec![Value::from(1), Value::from(3)]));
//! ```

// ============================================================================
// DECLARING: Schemas, builders, options
// ============================================================================

pub use crate::builder::{BuildContext, ElementBuilder, MapBuilder, Nested, SchemaBuilder};
pub use crate::models::ModelRegistry;
pub use crate::options::{CommonOptions, KindDefaults, Overlay};
pub use crate::policy::Policy;
pub use crate::schema::Schema;

// ============================================================================
// FEEDING: Values, filters, results
// ============================================================================

pub use crate::filter::{Coercion, FeedResult, Fed, Filter, Standalone};
pub use crate::kind::FilterKind;
pub use crate::outcome::Outcome;
pub use sift_value::{Host, HostObject, Map, Value, ValueKind};

// ============================================================================
// ERRORS: Error tree, views, fatal errors
// ============================================================================

pub use crate::error::{BuildError, ConfigError, FeedError, ValidationFailed};
pub use crate::errors::{
    DefaultMessages, ErrorAtom, ErrorCode, ErrorList, ErrorMap, ErrorNode, ErrorShape,
    MessageFormatter,
};
