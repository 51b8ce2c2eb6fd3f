use super::date::{check_format, parse_date};
use super::{Coercion, Filter};
use crate::error::BuildError;
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::options::{CommonOptions, TimeOptions};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use sift_value::Value;

/// Layouts without an offset, read as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

fn midnight_utc(date: NaiveDate) -> DateTime<FixedOffset> {
    date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

fn parse_time(text: &str, format: Option<&str>) -> Option<DateTime<FixedOffset>> {
    if let Some(format) = format {
        return DateTime::parse_from_str(text, format)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(text, format)
                    .ok()
                    .map(|naive| naive.and_utc().fixed_offset())
            })
            .or_else(|| NaiveDate::parse_from_str(text, format).ok().map(midnight_utc));
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| {
            NAIVE_FORMATS.iter().find_map(|layout| {
                NaiveDateTime::parse_from_str(text, layout)
                    .ok()
                    .map(|naive| naive.and_utc().fixed_offset())
            })
        })
        .or_else(|| parse_date(text, None).map(midnight_utc))
}

/// Coerces to `Time` (a timestamp with offset). Dates become midnight UTC.
#[derive(Debug, Clone)]
pub struct TimeFilter {
    options: TimeOptions,
}

impl TimeFilter {
    /// Checks the `format` option.
    pub fn new(options: TimeOptions) -> Result<Self, BuildError> {
        check_format("time", options.format.as_deref())?;
        Ok(Self { options })
    }
}

impl Filter for TimeFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Time
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::MALFORMED_TIME
    }

    fn coerce(&self, raw: Value) -> Coercion {
        let parsed = match &raw {
            Value::Time(_) => return Coercion::Value(raw),
            Value::Date(date) => Some(midnight_utc(*date)),
            Value::Text(text) if text.trim().is_empty() => return Coercion::Empty(raw),
            Value::Text(text) => parse_time(text.trim(), self.options.format.as_deref()),
            _ => None,
        };
        match parsed {
            Some(time) => Coercion::Value(Value::Time(time)),
            None => Coercion::invalid(raw, ErrorCode::MALFORMED_TIME),
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        matches!(value, Value::Time(_))
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let time = value.as_time()?;
        if self.options.min.is_some_and(|min| *time < min) {
            return Some(ErrorCode::BEFORE_BOUND);
        }
        if self.options.max.is_some_and(|max| *time > max) {
            return Some(ErrorCode::AFTER_BOUND);
        }
        None
    }
}
