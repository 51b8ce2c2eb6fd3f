use super::{Coercion, Filter};
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{BooleanOptions, CommonOptions};
use sift_value::Value;

/// Coerces to `Boolean` through the `coercion_map` option.
#[derive(Debug, Clone, Default)]
pub struct BooleanFilter {
    options: BooleanOptions,
}

impl BooleanFilter {
    #[must_use]
    pub const fn new(options: BooleanOptions) -> Self {
        Self { options }
    }

    fn lookup(&self, text: &str) -> Option<bool> {
        self.options
            .coercion_map
            .get(&text.trim().to_lowercase())
            .copied()
    }
}

impl Filter for BooleanFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Boolean
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::NOT_A_BOOLEAN
    }

    fn coerce(&self, raw: Value) -> Coercion {
        let coerced = match &raw {
            Value::Boolean(_) => return Coercion::Value(raw),
            Value::Text(text) if text.trim().is_empty() => return Coercion::Empty(raw),
            Value::Text(text) => self.lookup(text),
            Value::Integer(number) => self.lookup(&number.to_string()),
            _ => None,
        };
        match coerced {
            Some(flag) => Coercion::Value(Value::Boolean(flag)),
            None => Coercion::invalid(raw, ErrorCode::NOT_A_BOOLEAN),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Boolean(_))
    }
}
