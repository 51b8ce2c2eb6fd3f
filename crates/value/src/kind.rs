//! Value kinds.
//!
//! `ValueKind` is a lightweight, copyable classification of a [`Value`],
//! used in error reporting and in capability lookups.

use crate::Value;
use std::fmt;

/// The kind of a [`Value`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Decimal,
    Text,
    Date,
    Time,
    List,
    Map,
    Host,
}

impl ValueKind {
    /// Classifies a value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Boolean(_) => Self::Boolean,
            Value::Integer(_) => Self::Integer,
            Value::Float(_) => Self::Float,
            Value::Decimal(_) => Self::Decimal,
            Value::Text(_) => Self::Text,
            Value::Date(_) => Self::Date,
            Value::Time(_) => Self::Time,
            Value::List(_) => Self::List,
            Value::Map(_) => Self::Map,
            Value::Host(_) => Self::Host,
        }
    }

    /// Lower-case name, stable across releases.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::Date => "date",
            Self::Time => "time",
            Self::List => "list",
            Self::Map => "map",
            Self::Host => "host",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
