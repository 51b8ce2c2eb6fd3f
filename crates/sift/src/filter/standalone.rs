//! Filters fed outside any composite.

use super::{FeedResult, Filter};
use crate::builder::{BuildContext, ElementBuilder};
use crate::error::{BuildError, FeedError};
use crate::errors::ErrorNode;
use sift_value::Value;
use std::sync::Arc;

/// Result of feeding a [`Standalone`] filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Fed {
    pub value: Value,
    pub error: Option<ErrorNode>,
}

impl Fed {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// A filter with no composite parent.
///
/// Without a parent nothing can act on `Discard`, so construction rejects
/// filters whose own policies use it. A custom filter that still discards
/// while fed is a [`FeedError::Discarded`].
///
/// ```rust
/// use sift::{Standalone, Value};
///
/// let age = Standalone::build(|el| {
///     el.integer(|o| o.min = Some(0));
/// })
/// .unwrap();
///
/// assert_eq!(age.feed(Value::from("42")).unwrap().value, Value::from(42));
/// assert!(!age.feed(Value::from("-1")).unwrap().is_success());
/// ```
#[derive(Debug, Clone)]
pub struct Standalone {
    filter: Arc<dyn Filter>,
}

impl Standalone {
    pub fn new(filter: Arc<dyn Filter>) -> Result<Self, BuildError> {
        if let Some((option, _)) = filter
            .common()
            .policies()
            .into_iter()
            .find(|(_, policy)| policy.is_discard())
        {
            return Err(BuildError::DiscardAtTopLevel { option });
        }
        Ok(Self { filter })
    }

    /// Declares the filter with the standard build context.
    pub fn build(declare: impl FnOnce(&mut ElementBuilder)) -> Result<Self, BuildError> {
        Self::build_in(BuildContext::standard(), declare)
    }

    pub fn build_in(
        ctx: Arc<BuildContext>,
        declare: impl FnOnce(&mut ElementBuilder),
    ) -> Result<Self, BuildError> {
        let mut builder = ElementBuilder::new(ctx, None);
        declare(&mut builder);
        Self::new(builder.finish()?)
    }

    #[must_use]
    pub fn filter(&self) -> &Arc<dyn Filter> {
        &self.filter
    }

    pub fn feed(&self, raw: impl Into<Value>) -> Result<Fed, FeedError> {
        match self.filter.feed(raw.into()) {
            FeedResult::Accepted(value) => Ok(Fed { value, error: None }),
            FeedResult::Rejected { value, error } => Ok(Fed {
                value,
                error: Some(error),
            }),
            FeedResult::Discarded => Err(FeedError::Discarded {
                kind: self.filter.kind(),
            }),
        }
    }
}
