//! The per-kind defaults registry.

use super::kinds::*;
use super::Overlay;
use crate::error::ConfigError;
use crate::kind::FilterKind;
use once_cell::sync::Lazy;
use std::sync::Arc;

static STANDARD: Lazy<Arc<KindDefaults>> = Lazy::new(|| Arc::new(KindDefaults::default()));

/// Default options for every built-in kind.
///
/// Built once (from code or from a TOML document) and then shared by `Arc`
/// into every build; builders copy a kind's record before applying instance
/// options, so the registry itself is never modified by a build.
///
/// ```rust
/// use sift::{KindDefaults, Policy};
///
/// let defaults = KindDefaults::from_toml_str(r#"
///     [string]
///     strip = false
///     nils = "allow"
///
///     [integer]
///     delimiter = "_"
/// "#).unwrap();
///
/// assert!(!defaults.string.strip);
/// assert_eq!(defaults.string.common.nils, Policy::Allow);
/// assert_eq!(defaults.integer.delimiter, "_");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KindDefaults {
    pub any: AnyOptions,
    pub boolean: BooleanOptions,
    pub string: StringOptions,
    pub integer: IntegerOptions,
    pub float: FloatOptions,
    pub decimal: DecimalOptions,
    pub date: DateOptions,
    pub time: TimeOptions,
    pub duck: DuckOptions,
    pub file: FileOptions,
    pub model: ModelOptions,
    pub list: ListOptions,
    pub map: MapOptions,
}

impl KindDefaults {
    /// The built-in defaults, shared process-wide.
    #[must_use]
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// Built-in defaults overlaid with a TOML document.
    ///
    /// Each top-level table names a kind; its keys are option names.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut defaults = Self::default();
        defaults.apply_toml_str(source)?;
        Ok(defaults)
    }

    /// Overlays a TOML document onto these defaults.
    pub fn apply_toml_str(&mut self, source: &str) -> Result<(), ConfigError> {
        let document = toml::from_str::<serde_json::Map<String, serde_json::Value>>(source)?;
        for (kind, section) in document {
            let serde_json::Value::Object(entries) = section else {
                return Err(ConfigError::InvalidSection(kind));
            };
            let count = entries.len();
            self.overlay_kind(&kind, entries)?;
            tracing::debug!(kind = %kind, options = count, "applied kind defaults section");
        }
        Ok(())
    }

    /// Overlays named options onto one kind's defaults.
    pub fn overlay_kind(
        &mut self,
        kind: &str,
        entries: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), ConfigError> {
        let kind =
            FilterKind::from_name(kind).ok_or_else(|| ConfigError::UnknownKind(kind.to_owned()))?;
        match kind {
            FilterKind::Any => self.any.overlay(entries)?,
            FilterKind::Boolean => self.boolean.overlay(entries)?,
            FilterKind::String => self.string.overlay(entries)?,
            FilterKind::Integer => self.integer.overlay(entries)?,
            FilterKind::Float => self.float.overlay(entries)?,
            FilterKind::Decimal => self.decimal.overlay(entries)?,
            FilterKind::Date => self.date.overlay(entries)?,
            FilterKind::Time => self.time.overlay(entries)?,
            FilterKind::Duck => self.duck.overlay(entries)?,
            FilterKind::File => self.file.overlay(entries)?,
            FilterKind::Model => self.model.overlay(entries)?,
            FilterKind::List => self.list.overlay(entries)?,
            FilterKind::Map => self.map.overlay(entries)?,
            FilterKind::Custom => return Err(ConfigError::UnknownKind(kind.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;
    use pretty_assertions::assert_eq;
    use sift_value::Value;

    #[test]
    fn standard_is_shared() {
        let a = KindDefaults::standard();
        let b = KindDefaults::standard();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, KindDefaults::default());
    }

    #[test]
    fn substitutes_and_tokens_from_toml() {
        let defaults = KindDefaults::from_toml_str(
            r#"
            [integer]
            missing = 0
            invalid = "discard"

            [string]
            empty = { substitute = "deny" }
            "#,
        )
        .unwrap();
        assert_eq!(defaults.integer.common.missing, Policy::Substitute(Value::Integer(0)));
        assert_eq!(defaults.integer.common.invalid, Policy::Discard);
        assert_eq!(defaults.string.common.empty, Policy::substitute("deny"));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = KindDefaults::from_toml_str("[symbol]\nstrip = true").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind(kind) if kind == "symbol"));
    }

    #[test]
    fn unknown_option_is_an_error() {
        let err = KindDefaults::from_toml_str("[list]\nwrapped = true").unwrap_err();
        assert!(matches!(err, ConfigError::Option(_)));
    }

    #[test]
    fn non_table_section_is_an_error() {
        let err = KindDefaults::from_toml_str("string = 1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSection(kind) if kind == "string"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = KindDefaults::from_toml_str("[string").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
