//! The core [`Value`] enum.

use crate::host::Host;
use crate::kind::ValueKind;
use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::fmt;

/// Ordered string-keyed map. Iteration follows insertion order.
pub type Map = IndexMap<String, Value>;

/// A dynamic value.
///
/// Raw input uses the JSON-like subset (`Null`, `Boolean`, `Integer`,
/// `Float`, `Text`, `List`, `Map`); coercion can additionally produce
/// `Decimal`, `Date` and `Time`. `Host` carries caller-owned objects.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Time(DateTime<FixedOffset>),
    List(Vec<Value>),
    Map(Map),
    Host(Host),
}

// ============================================================================
// Inspection
// ============================================================================

impl Value {
    /// Kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        ValueKind::of(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_host(&self) -> Option<&Host> {
        match self {
            Self::Host(host) => Some(host),
            _ => None,
        }
    }

    /// Looks up a key when this value is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Looks up a position when this value is a list.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Whether this value answers the named capability.
    ///
    /// Built-in values answer a fixed set: every value answers `to_string`,
    /// text, lists and maps answer `len`, lists and maps answer `iter`, maps
    /// answer `keys`. Hosts decide for themselves.
    #[must_use]
    pub fn has_capability(&self, capability: &str) -> bool {
        match (self, capability) {
            (Self::Host(host), _) => host.object().has_capability(capability),
            (_, "to_string")
            | (Self::Text(_) | Self::List(_) | Self::Map(_), "len")
            | (Self::List(_) | Self::Map(_), "iter")
            | (Self::Map(_), "keys") => true,
            _ => false,
        }
    }
}

// ============================================================================
// Equality and display
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Host(a), Self::Host(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Time(t) => f.write_str(&t.to_rfc3339()),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
            Self::Host(host) => write!(f, "<{}>", host.object().type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_map() -> Value {
        let mut map = Map::new();
        map.insert("b".into(), Value::from(2));
        map.insert("a".into(), Value::from("x"));
        Value::Map(map)
    }

    #[test]
    fn map_lookup_preserves_order() {
        let value = sample_map();
        assert_eq!(value.get("a"), Some(&Value::from("x")));
        assert_eq!(value.get("missing"), None);
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn list_lookup() {
        let value = Value::List(vec![Value::from(1), Value::Null]);
        assert_eq!(value.at(0), Some(&Value::from(1)));
        assert_eq!(value.at(2), None);
        assert_eq!(Value::from(1).at(0), None);
    }

    #[test]
    fn typed_accessors_reject_other_kinds() {
        assert_eq!(Value::from(3).as_i64(), Some(3));
        assert_eq!(Value::from(3).as_f64(), None);
        assert_eq!(Value::from("3").as_i64(), None);
        assert!(Value::Null.is_null());
    }

    #[test]
    fn builtin_capabilities() {
        assert!(Value::from("abc").has_capability("len"));
        assert!(!Value::from("abc").has_capability("iter"));
        assert!(sample_map().has_capability("keys"));
        assert!(Value::List(vec![]).has_capability("iter"));
        assert!(Value::from(1).has_capability("to_string"));
        assert!(!Value::from(1).has_capability("len"));
    }

    #[test]
    fn integer_and_float_are_distinct() {
        assert_ne!(Value::from(1), Value::from(1.0));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(sample_map().to_string(), "{b: 2, a: x}");
        assert_eq!(
            Value::List(vec![Value::from(true), Value::Null]).to_string(),
            "[true, null]"
        );
    }
}
