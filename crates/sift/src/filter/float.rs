use super::numeric;
use super::{Coercion, Filter};
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, FloatOptions};
use rust_decimal::prelude::ToPrimitive;
use sift_value::Value;

/// Coerces to `Float`. Integers and decimals widen; text is cleaned first.
#[derive(Debug, Clone, Default)]
pub struct FloatFilter {
    options: FloatOptions,
}

impl FloatFilter {
    #[must_use]
    pub const fn new(options: FloatOptions) -> Self {
        Self { options }
    }

    fn parse(&self, text: &str) -> Option<f64> {
        let cleaned = numeric::clean(text, &self.options.delimiter, self.options.decimal_mark)?;
        let normal = numeric::decimal_text(&cleaned)?;
        normal.parse::<f64>().ok().filter(|number| number.is_finite())
    }
}

impl Filter for FloatFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Float
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::NOT_A_NUMBER
    }

    fn coerce(&self, raw: Value) -> Coercion {
        let parsed = match &raw {
            Value::Float(number) if number.is_finite() => return Coercion::Value(raw),
            Value::Integer(number) => Some(*number as f64),
            Value::Decimal(number) => number.to_f64(),
            Value::Text(text) if text.trim().is_empty() => return Coercion::Empty(raw),
            Value::Text(text) => self.parse(text.trim()),
            _ => None,
        };
        match parsed {
            Some(number) => Coercion::Value(Value::Float(number)),
            None => Coercion::invalid(raw, ErrorCode::NOT_A_NUMBER),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Float(_))
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let number = value.as_f64()?;
        let options = &self.options;
        if options.min.is_some_and(|min| number < min) || options.max.is_some_and(|max| number > max)
        {
            return Some(ErrorCode::OUT_OF_RANGE);
        }
        if options
            .scale
            .is_some_and(|scale| numeric::float_scale(number) > scale)
        {
            return Some(ErrorCode::TOO_PRECISE);
        }
        None
    }
}
