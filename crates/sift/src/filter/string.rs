use super::{Coercion, Filter};
use crate::error::BuildError;
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, StringOptions};
use regex::Regex;
use sift_value::Value;

/// Coerces scalars to `Text` and checks length, membership and pattern.
#[derive(Debug, Clone)]
pub struct StringFilter {
    options: StringOptions,
    pattern: Option<Regex>,
}

impl StringFilter {
    /// Compiles the `pattern` option.
    pub fn new(options: StringOptions) -> Result<Self, BuildError> {
        let pattern = options
            .pattern
            .as_deref()
            .map(|source| {
                Regex::new(source).map_err(|err| BuildError::InvalidPattern {
                    pattern: source.to_owned(),
                    reason: err.to_string(),
                })
            })
            .transpose()?;
        Ok(Self { options, pattern })
    }

    fn clean(&self, text: String) -> String {
        let text = if self.options.allow_control_characters {
            text
        } else {
            replace_control_characters(&text)
        };
        if self.options.squish {
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else if self.options.strip {
            text.trim().to_owned()
        } else {
            text
        }
    }
}

/// Replaces runs of control characters (other than tab, newline and
/// carriage return) with a single space.
fn replace_control_characters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

impl Filter for StringFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::String
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn coerce(&self, raw: Value) -> Coercion {
        let text = match raw {
            Value::Text(text) => text,
            Value::Boolean(flag) => flag.to_string(),
            Value::Integer(number) => number.to_string(),
            Value::Float(number) => number.to_string(),
            Value::Decimal(number) => number.to_string(),
            other => return Coercion::invalid(other, ErrorCode::WRONG_TYPE),
        };
        let text = self.clean(text);
        if text.is_empty() {
            Coercion::Empty(Value::Text(text))
        } else {
            Coercion::Value(Value::Text(text))
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Text(_))
    }

    fn is_empty(&self, value: &Value) -> bool {
        value.as_str().is_some_and(str::is_empty)
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let text = value.as_str()?;
        let length = text.chars().count();
        let options = &self.options;
        if options.min_length.is_some_and(|min| length < min) {
            return Some(ErrorCode::TOO_SHORT);
        }
        if options.max_length.is_some_and(|max| length > max) {
            return Some(ErrorCode::TOO_LONG);
        }
        if options
            .allowed_values
            .as_ref()
            .is_some_and(|allowed| !allowed.iter().any(|candidate| candidate == text))
        {
            return Some(ErrorCode::NOT_IN_SET);
        }
        if self.pattern.as_ref().is_some_and(|re| !re.is_match(text)) {
            return Some(ErrorCode::PATTERN_MISMATCH);
        }
        None
    }
}
