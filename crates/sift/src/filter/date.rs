use super::{Coercion, Filter};
use crate::error::BuildError;
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, DateOptions};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate};
use sift_value::Value;

/// Text layouts tried, in order, when no `format` is configured.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

/// Checks a strftime format before it is used for parsing.
pub(super) fn check_format(kind: &'static str, format: Option<&str>) -> Result<(), BuildError> {
    match format {
        Some(format) if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) => {
            Err(BuildError::InvalidFormat {
                kind,
                format: format.to_owned(),
            })
        }
        _ => Ok(()),
    }
}

/// Parses a calendar date with the built-in layouts (or just the given one).
pub(super) fn parse_date(text: &str, format: Option<&str>) -> Option<NaiveDate> {
    if let Some(format) = format {
        return NaiveDate::parse_from_str(text, format).ok();
    }
    DATE_FORMATS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|t| t.date_naive()))
}

/// Coerces to `Date`. Times are truncated to their (local) date.
#[derive(Debug, Clone)]
pub struct DateFilter {
    options: DateOptions,
}

impl DateFilter {
    /// Checks the `format` option.
    pub fn new(options: DateOptions) -> Result<Self, BuildError> {
        check_format("date", options.format.as_deref())?;
        Ok(Self { options })
    }
}

impl Filter for DateFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Date
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::MALFORMED_DATE
    }

    fn coerce(&self, raw: Value) -> Coercion {
        let parsed = match &raw {
            Value::Date(_) => return Coercion::Value(raw),
            Value::Time(time) => Some(time.date_naive()),
            Value::Text(text) if text.trim().is_empty() => return Coercion::Empty(raw),
            Value::Text(text) => parse_date(text.trim(), self.options.format.as_deref()),
            _ => None,
        };
        match parsed {
            Some(date) => Coercion::Value(Value::Date(date)),
            None => Coercion::invalid(raw, ErrorCode::MALFORMED_DATE),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Date(_))
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let date = value.as_date()?;
        if self.options.min.is_some_and(|min| date < min) {
            return Some(ErrorCode::BEFORE_BOUND);
        }
        if self.options.max.is_some_and(|max| date > max) {
            return Some(ErrorCode::AFTER_BOUND);
        }
        None
    }
}
