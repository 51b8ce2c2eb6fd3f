//! Filter kind names.

use std::fmt;

/// The built-in filter kinds.
///
/// Kind names are what configuration sections and
/// [`MapBuilder::add_child`](crate::MapBuilder::add_child) refer to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FilterKind {
    Any,
    Boolean,
    String,
    Integer,
    Float,
    Decimal,
    Date,
    Time,
    Duck,
    File,
    Model,
    List,
    Map,
    /// A caller-supplied [`Filter`](crate::Filter) implementation.
    Custom,
}

impl FilterKind {
    /// Every kind that can be constructed by name.
    pub const BUILT_IN: [Self; 13] = [
        Self::Any,
        Self::Boolean,
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Decimal,
        Self::Date,
        Self::Time,
        Self::Duck,
        Self::File,
        Self::Model,
        Self::List,
        Self::Map,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::Duck => "duck",
            Self::File => "file",
            Self::Model => "model",
            Self::List => "list",
            Self::Map => "map",
            Self::Custom => "custom",
        }
    }

    /// Looks up a built-in kind by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::BUILT_IN.into_iter().find(|kind| kind.as_str() == name)
    }

    /// List and map nodes own children.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Map)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
