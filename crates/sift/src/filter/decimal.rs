use super::numeric;
use super::{Coercion, Filter};
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, DecimalOptions};
use rust_decimal::Decimal;
use sift_value::Value;
use std::str::FromStr;

/// Coerces to `Decimal`, keeping the precision of the input.
///
/// Floats convert through their shortest textual form, so `0.1` becomes
/// exactly `0.1`.
#[derive(Debug, Clone, Default)]
pub struct DecimalFilter {
    options: DecimalOptions,
}

impl DecimalFilter {
    #[must_use]
    pub const fn new(options: DecimalOptions) -> Self {
        Self { options }
    }

    fn parse(&self, text: &str) -> Option<Decimal> {
        let cleaned = numeric::clean(text, &self.options.delimiter, self.options.decimal_mark)?;
        let normal = numeric::decimal_text(&cleaned)?;
        Decimal::from_str(&normal).ok()
    }
}

impl Filter for DecimalFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Decimal
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::NOT_A_NUMBER
    }

    fn coerce(&self, raw: Value) -> Coercion {
        let parsed = match &raw {
            Value::Decimal(_) => return Coercion::Value(raw),
            Value::Integer(number) => Some(Decimal::from(*number)),
            Value::Float(number) if number.is_finite() => {
                Decimal::from_str(&number.to_string()).ok()
            }
            Value::Text(text) if text.trim().is_empty() => return Coercion::Empty(raw),
            Value::Text(text) => self.parse(text.trim()),
            _ => None,
        };
        match parsed {
            Some(number) => Coercion::Value(Value::Decimal(number)),
            None => Coercion::invalid(raw, ErrorCode::NOT_A_NUMBER),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Decimal(_))
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let number = value.as_decimal()?;
        let options = &self.options;
        if options.min.is_some_and(|min| number < min) || options.max.is_some_and(|max| number > max)
        {
            return Some(ErrorCode::OUT_OF_RANGE);
        }
        if options
            .scale
            .is_some_and(|scale| number.round_dp(scale) != number)
        {
            return Some(ErrorCode::TOO_PRECISE);
        }
        None
    }
}
