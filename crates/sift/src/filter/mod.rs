//! Filter nodes.
//!
//! A [`Filter`] coerces and validates one part of an input tree. Leaf kinds
//! convert scalars; [`ListFilter`] and [`MapFilter`] own children and merge
//! their results bottom-up. Every node is fed through the same protocol (see
//! [`Filter::feed`]), so policies behave identically at every depth.

mod any;
mod boolean;
mod date;
mod decimal;
mod duck;
mod file;
mod float;
mod integer;
mod list;
mod map;
mod model;
mod numeric;
mod protocol;
mod standalone;
mod string;
mod time;

pub use any::AnyFilter;
pub use boolean::BooleanFilter;
pub use date::DateFilter;
pub use decimal::DecimalFilter;
pub use duck::DuckFilter;
pub use file::FileFilter;
pub use float::FloatFilter;
pub use integer::IntegerFilter;
pub use list::ListFilter;
pub use map::MapFilter;
pub use model::ModelFilter;
pub use standalone::{Fed, Standalone};
pub use string::StringFilter;
pub use time::TimeFilter;

use crate::errors::{ErrorAtom, ErrorCode, ErrorNode};
use crate::kind::FilterKind;
use crate::options::CommonOptions;
use indexmap::IndexMap;
use sift_value::Value;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// RESULTS
// ============================================================================

/// What kind-specific coercion made of a raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// A value of the target type.
    Value(Value),
    /// A value of the target type that counts as blank.
    Empty(Value),
    /// The raw value could not be coerced.
    Invalid { raw: Value, code: ErrorCode },
}

impl Coercion {
    pub(crate) fn invalid(raw: Value, code: ErrorCode) -> Self {
        Self::Invalid { raw, code }
    }
}

/// Result of feeding one node.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedResult {
    Accepted(Value),
    /// The node failed. `value` is what the node saw (raw when coercion
    /// failed); composite parents decide whether to keep it.
    Rejected { value: Value, error: ErrorNode },
    /// The parent must omit this entry from its output, with no error.
    Discarded,
}

impl FeedResult {
    /// A rejection with a single atom.
    #[must_use]
    pub fn reject(value: Value, code: ErrorCode) -> Self {
        Self::Rejected {
            value,
            error: ErrorNode::Atom(ErrorAtom::new(code)),
        }
    }

    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    #[must_use]
    pub const fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded)
    }

    /// The value, accepted or not.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Accepted(value) | Self::Rejected { value, .. } => Some(value),
            Self::Discarded => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ErrorNode> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// A node's children, for inspection.
#[derive(Debug, Clone, Copy)]
pub enum Children<'a> {
    None,
    Fields(&'a IndexMap<String, Arc<dyn Filter>>),
    Element(&'a Arc<dyn Filter>),
}

// ============================================================================
// FILTER TRAIT
// ============================================================================

/// A node of a filter tree.
///
/// Implementors supply the kind-specific steps; [`feed`](Filter::feed) runs
/// them in a fixed order:
///
/// 1. a null value resolves the `nils` policy;
/// 2. [`coerce`](Filter::coerce) converts the raw value (in strict mode
///    [`conforms`](Filter::conforms) and [`is_empty`](Filter::is_empty) are
///    asked instead);
/// 3. a failed coercion resolves the `invalid` policy, a blank one the
///    `empty` policy;
/// 4. [`validate`](Filter::validate) runs the rules, first failure wins;
/// 5. [`aggregate`](Filter::aggregate) lets composites feed their children.
///
/// Values produced by a `Substitute` policy skip steps 4 and 5.
///
/// Built trees are immutable and can be fed from many threads at once.
///
/// # Examples
///
/// ```rust
/// use sift::filter::Coercion;
/// use sift::{CommonOptions, ErrorCode, Filter, FilterKind, Value};
///
/// #[derive(Debug, Default)]
/// struct Even(CommonOptions);
///
/// impl Filter for Even {
///     fn kind(&self) -> FilterKind { FilterKind::Custom }
///     fn common(&self) -> &CommonOptions { &self.0 }
///     fn coerce(&self, raw: Value) -> Coercion {
///         match raw {
///             Value::Integer(_) => Coercion::Value(raw),
///             raw => Coercion::Invalid { raw, code: ErrorCode::NOT_AN_INTEGER },
///         }
///     }
///     fn conforms(&self, value: &Value) -> bool { value.as_i64().is_some() }
///     fn validate(&self, value: &Value) -> Option<ErrorCode> {
///         (value.as_i64()? % 2 != 0).then(|| ErrorCode::new("odd"))
///     }
/// }
///
/// assert!(Even::default().feed(Value::from(4)).is_accepted());
/// assert!(!Even::default().feed(Value::from(3)).is_accepted());
/// ```
pub trait Filter: fmt::Debug + Send + Sync {
    fn kind(&self) -> FilterKind;

    fn common(&self) -> &CommonOptions;

    /// Converts a non-null raw value to the target type.
    fn coerce(&self, raw: Value) -> Coercion;

    /// Whether a raw value already has the target type (strict mode).
    fn conforms(&self, value: &Value) -> bool;

    /// Code reported when a strict-mode value does not conform.
    fn type_code(&self) -> ErrorCode {
        ErrorCode::WRONG_TYPE
    }

    /// Whether a conforming value counts as blank (strict mode).
    fn is_empty(&self, _value: &Value) -> bool {
        false
    }

    /// Runs the kind's rules in order; the first failure wins.
    fn validate(&self, _value: &Value) -> Option<ErrorCode> {
        None
    }

    /// Composite hook, run after validation succeeded.
    fn aggregate(&self, value: Value) -> FeedResult {
        FeedResult::Accepted(value)
    }

    fn children(&self) -> Children<'_> {
        Children::None
    }

    /// Feeds a present value.
    fn feed(&self, raw: Value) -> FeedResult {
        protocol::feed(self, raw)
    }

    /// Feeds the absence of a value (the parent has no entry for the key).
    fn feed_missing(&self) -> FeedResult {
        self.common().missing.resolve_missing()
    }
}
