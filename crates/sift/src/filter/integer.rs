use super::numeric;
use super::{Coercion, Filter};
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, IntegerOptions};
use rust_decimal::prelude::ToPrimitive;
use sift_value::Value;

/// Coerces to `Integer`.
///
/// Integral floats and decimals convert; text is cleaned of delimiters and
/// may carry an all-zero fraction (`"1,200.00"`).
#[derive(Debug, Clone, Default)]
pub struct IntegerFilter {
    options: IntegerOptions,
}

impl IntegerFilter {
    #[must_use]
    pub const fn new(options: IntegerOptions) -> Self {
        Self { options }
    }

    fn parse(&self, text: &str) -> Option<i64> {
        let cleaned = numeric::clean(text, &self.options.delimiter, self.options.decimal_mark)?;
        numeric::parse_integer(&cleaned)
    }
}

fn integral_float(number: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (number.is_finite() && number.fract() == 0.0 && (-LIMIT..LIMIT).contains(&number))
        .then_some(number as i64)
}

impl Filter for IntegerFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Integer
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::NOT_AN_INTEGER
    }

    fn coerce(&self, raw: Value) -> Coercion {
        let parsed = match &raw {
            Value::Integer(_) => return Coercion::Value(raw),
            Value::Float(number) => integral_float(*number),
            Value::Decimal(number) if number.fract().is_zero() => number.to_i64(),
            Value::Text(text) if text.trim().is_empty() => return Coercion::Empty(raw),
            Value::Text(text) => self.parse(text.trim()),
            _ => None,
        };
        match parsed {
            Some(number) => Coercion::Value(Value::Integer(number)),
            None => Coercion::invalid(raw, ErrorCode::NOT_AN_INTEGER),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Integer(_))
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let number = value.as_i64()?;
        let options = &self.options;
        if options
            .allowed_values
            .as_ref()
            .is_some_and(|allowed| !allowed.contains(&number))
        {
            return Some(ErrorCode::NOT_IN_SET);
        }
        if options.min.is_some_and(|min| number < min) || options.max.is_some_and(|max| number > max)
        {
            return Some(ErrorCode::OUT_OF_RANGE);
        }
        None
    }
}
