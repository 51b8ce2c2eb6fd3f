//! Options records for the built-in kinds.

use crate::policy::Policy;
use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;

fn default_delimiter() -> String {
    ", ".to_string()
}

fn default_boolean_map() -> IndexMap<String, bool> {
    [("true", true), ("false", false), ("1", true), ("0", false)]
        .into_iter()
        .map(|(text, value)| (text.to_string(), value))
        .collect()
}

filter_options! {
    /// Options for the any kind. Null and blank values pass by default.
    pub struct AnyOptions as "any" {}
    common { nils: Policy::Allow, empty: Policy::Allow }
}

filter_options! {
    /// Options for the boolean kind.
    pub struct BooleanOptions as "boolean" {
        /// Lower-cased text accepted as a boolean.
        coercion_map: IndexMap<String, bool> = default_boolean_map(),
    }
}

filter_options! {
    /// Options for the string kind.
    pub struct StringOptions as "string" {
        /// Trim surrounding whitespace.
        strip: bool = true,
        /// Collapse inner whitespace runs to a single space.
        squish: bool = false,
        /// Keep control characters other than tab, newline and return.
        allow_control_characters: bool = false,
        /// Minimum length in characters.
        min_length: Option<usize> = None,
        /// Maximum length in characters.
        max_length: Option<usize> = None,
        allowed_values: Option<Vec<String>> = None,
        /// Regular expression the value must match.
        pattern: Option<String> = None,
    }
}

filter_options! {
    /// Options for the integer kind.
    pub struct IntegerOptions as "integer" {
        /// Characters ignored in text input (thousands separators).
        delimiter: String = default_delimiter(),
        decimal_mark: char = '.',
        min: Option<i64> = None,
        max: Option<i64> = None,
        allowed_values: Option<Vec<i64>> = None,
    }
}

filter_options! {
    /// Options for the float kind.
    pub struct FloatOptions as "float" {
        delimiter: String = default_delimiter(),
        decimal_mark: char = '.',
        min: Option<f64> = None,
        max: Option<f64> = None,
        /// Maximum number of decimal places.
        scale: Option<u32> = None,
    }
}

filter_options! {
    /// Options for the decimal kind.
    pub struct DecimalOptions as "decimal" {
        delimiter: String = default_delimiter(),
        decimal_mark: char = '.',
        min: Option<Decimal> = None,
        max: Option<Decimal> = None,
        /// Maximum number of decimal places.
        scale: Option<u32> = None,
    }
}

filter_options! {
    /// Options for the date kind.
    pub struct DateOptions as "date" {
        /// strftime format for text input; built-in formats when absent.
        format: Option<String> = None,
        min: Option<NaiveDate> = None,
        max: Option<NaiveDate> = None,
    }
}

filter_options! {
    /// Options for the time kind.
    pub struct TimeOptions as "time" {
        /// strftime format for text input; the offset is optional (UTC).
        format: Option<String> = None,
        min: Option<DateTime<FixedOffset>> = None,
        max: Option<DateTime<FixedOffset>> = None,
    }
}

filter_options! {
    /// Options for the duck kind.
    pub struct DuckOptions as "duck" {
        /// Capabilities the value must answer.
        capabilities: Vec<String> = Vec::new(),
    }
}

filter_options! {
    /// Options for the file kind.
    pub struct FileOptions as "file" {
        /// Also require `original_filename` and `content_type`.
        upload: bool = false,
        /// Maximum size in bytes.
        max_size: Option<u64> = None,
    }
}

filter_options! {
    /// Options for the model kind.
    pub struct ModelOptions as "model" {
        /// Registered class name; the camel-cased key when absent.
        class: Option<String> = None,
        /// Accept records that are not persisted yet.
        new_records: bool = false,
    }
}

filter_options! {
    /// Options for the list kind. Empty lists pass by default.
    pub struct ListOptions as "list" {
        /// Wrap a non-list value into a one-element list.
        wrap: bool = false,
    }
    common { empty: Policy::Allow }
}

filter_options! {
    /// Options for the map kind.
    pub struct MapOptions as "map" {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptionError;
    use crate::options::Overlay;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn per_kind_common_defaults() {
        assert_eq!(AnyOptions::default().common.nils, Policy::Allow);
        assert_eq!(ListOptions::default().common.empty, Policy::Allow);
        assert_eq!(ListOptions::default().common.nils, Policy::Deny);
        assert_eq!(StringOptions::default().common.empty, Policy::Deny);
    }

    #[test]
    fn kind_field_defaults() {
        let string = StringOptions::default();
        assert!(string.strip);
        assert!(!string.squish);
        assert_eq!(IntegerOptions::default().delimiter, ", ");
        assert_eq!(BooleanOptions::default().coercion_map.get("0"), Some(&false));
    }

    #[test]
    fn typed_values_decode_from_json() {
        let mut decimal = DecimalOptions::default();
        decimal.set("min", json!("0.5")).unwrap();
        decimal.set("decimal_mark", json!(",")).unwrap();
        assert_eq!(decimal.min, Some(Decimal::from_str("0.5").unwrap()));
        assert_eq!(decimal.decimal_mark, ',');

        let mut date = DateOptions::default();
        date.set("max", json!("2030-12-31")).unwrap();
        assert_eq!(date.max, NaiveDate::from_ymd_opt(2030, 12, 31));
    }

    #[test]
    fn ill_typed_values_are_reported_with_the_kind() {
        let mut integer = IntegerOptions::default();
        let err = integer.set("min", json!("low")).unwrap_err();
        assert!(matches!(
            err,
            OptionError::InvalidValue { kind: "integer", ref name, .. } if name == "min"
        ));
    }

    #[test]
    fn map_options_only_know_common_names() {
        let mut map = MapOptions::default();
        assert!(map.set("nils", json!("allow")).is_ok());
        assert!(matches!(
            map.set("wrap", json!(true)),
            Err(OptionError::Unknown { kind: "map", .. })
        ));
    }
}
