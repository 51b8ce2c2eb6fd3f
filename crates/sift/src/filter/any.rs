use super::{Coercion, Filter};
use crate::kind::FilterKind;
use crate::options::{AnyOptions, CommonOptions};
use sift_value::Value;

/// Accepts any value unchanged.
#[derive(Debug, Clone, Default)]
pub struct AnyFilter {
    options: AnyOptions,
}

impl AnyFilter {
    #[must_use]
    pub const fn new(options: AnyOptions) -> Self {
        Self { options }
    }
}

impl Filter for AnyFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Any
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Coercion {
        Coercion::Value(raw)
    }

    fn conforms(&self, _value: &Value) -> bool {
        true
    }
}
