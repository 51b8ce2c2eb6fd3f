//! # sift-value
//!
//! The dynamic value tree that sift filter trees read and write.
//!
//! Raw input arrives as a [`Value`] (usually converted from `serde_json`),
//! filters coerce it into typed variants (`Integer`, `Decimal`, `Date`, ...)
//! and the coerced tree comes back out as a [`Value`] again.
//!
//! ```rust
//! use sift_value::{Value, ValueKind};
//! use serde_json::json;
//!
//! let v = Value::from(json!({"name": "Ada", "tags": ["x", "y"]}));
//! assert_eq!(v.kind(), ValueKind::Map);
//! assert_eq!(v.get("name"), Some(&Value::from("Ada")));
//! ```
//!
//! Caller-owned objects (records, uploaded files, anything the caller wants a
//! filter to inspect without converting) travel as [`Value::Host`] through
//! the [`HostObject`] trait.

mod convert;
mod host;
mod kind;
mod serde_impls;
mod value;

pub use host::{Host, HostObject};
pub use kind::ValueKind;
pub use value::{Map, Value};

/// Re-exported so callers can build decimal and temporal values without
/// pinning their own versions.
pub use chrono::{DateTime, FixedOffset, NaiveDate};
pub use rust_decimal::Decimal;
