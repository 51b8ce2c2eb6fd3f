use super::{Children, Coercion, FeedResult, Filter};
use crate::errors::{ErrorCode, ErrorList, ErrorNode};
use crate::kind::FilterKind;
use crate::options::{CommonOptions, ListOptions};
use sift_value::Value;
use std::sync::Arc;

/// A homogeneous list: every element is fed through one element filter.
///
/// Discarded elements are dropped and later elements shift down, so error
/// indices refer to positions in the *output* list. A rejected element keeps
/// its value in its slot.
#[derive(Debug, Clone)]
pub struct ListFilter {
    options: ListOptions,
    element: Arc<dyn Filter>,
}

impl ListFilter {
    #[must_use]
    pub fn new(options: ListOptions, element: Arc<dyn Filter>) -> Self {
        Self { options, element }
    }

    #[must_use]
    pub fn element(&self) -> &Arc<dyn Filter> {
        &self.element
    }
}

impl Filter for ListFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::List
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::NOT_A_LIST
    }

    fn coerce(&self, raw: Value) -> Coercion {
        match raw {
            Value::List(items) if items.is_empty() => Coercion::Empty(Value::List(items)),
            Value::List(_) => Coercion::Value(raw),
            other if self.options.wrap => Coercion::Value(Value::List(vec![other])),
            other => Coercion::invalid(other, ErrorCode::NOT_A_LIST),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::List(_))
    }

    fn is_empty(&self, value: &Value) -> bool {
        value.as_list().is_some_and(<[Value]>::is_empty)
    }

    fn aggregate(&self, value: Value) -> FeedResult {
        let Value::List(items) = value else {
            return FeedResult::reject(value, ErrorCode::NOT_A_LIST);
        };

        let mut output = Vec::with_capacity(items.len());
        let mut errors = ErrorList::new();
        for raw in items {
            match self.element.feed(raw) {
                FeedResult::Accepted(value) => output.push(value),
                FeedResult::Rejected { value, error } => {
                    errors.insert(output.len(), error.indexed(output.len()));
                    output.push(value);
                }
                FeedResult::Discarded => {}
            }
        }

        if errors.is_empty() {
            FeedResult::Accepted(Value::List(output))
        } else {
            FeedResult::Rejected {
                value: Value::List(output),
                error: ErrorNode::List(errors),
            }
        }
    }

    fn children(&self) -> Children<'_> {
        Children::Element(&self.element)
    }
}
