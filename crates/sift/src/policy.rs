//! Policy tokens.
//!
//! Every filter carries four policies, one per boundary condition:
//!
//! | option    | condition                                       | `Deny` code |
//! |-----------|-------------------------------------------------|-------------|
//! | `missing` | the parent had no entry for the key             | `required`  |
//! | `nils`    | the raw value is null                           | `nils`      |
//! | `invalid` | coercion failed                                 | coercion's  |
//! | `empty`   | the coerced value is blank (`""`, `[]`)         | `empty`     |
//!
//! All four go through [`Policy::resolve`] (or [`Policy::resolve_missing`]),
//! so they behave identically.

use crate::errors::ErrorCode;
use crate::filter::FeedResult;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sift_value::Value;

/// How a filter reacts to a boundary condition.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Policy<T = Value> {
    /// Accept the value unchanged.
    Allow,
    /// The condition is an error.
    #[default]
    Deny,
    /// Omit the value from the parent's output, with no error.
    Discard,
    /// Use this value instead. Substitutes are not validated.
    Substitute(T),
}

impl<T> Policy<T> {
    #[must_use]
    pub const fn is_discard(&self) -> bool {
        matches!(self, Self::Discard)
    }

    /// Name of the token, `"substitute"` for literal values.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::Discard => "discard",
            Self::Substitute(_) => "substitute",
        }
    }
}

impl Policy {
    /// Substitute shorthand.
    pub fn substitute(value: impl Into<Value>) -> Self {
        Self::Substitute(value.into())
    }

    /// Resolves a present value under this policy.
    ///
    /// `deny` is the code reported when the policy is [`Policy::Deny`].
    #[must_use]
    pub fn resolve(&self, value: Value, deny: ErrorCode) -> FeedResult {
        match self {
            Self::Allow => FeedResult::Accepted(value),
            Self::Deny => FeedResult::reject(value, deny),
            Self::Discard => FeedResult::Discarded,
            Self::Substitute(substitute) => FeedResult::Accepted(substitute.clone()),
        }
    }

    /// Resolves an absent key.
    ///
    /// There is nothing to pass through, so `Allow` omits the key like
    /// `Discard` does.
    #[must_use]
    pub fn resolve_missing(&self) -> FeedResult {
        match self {
            Self::Allow | Self::Discard => FeedResult::Discarded,
            Self::Deny => FeedResult::reject(Value::Null, ErrorCode::REQUIRED),
            Self::Substitute(substitute) => FeedResult::Accepted(substitute.clone()),
        }
    }

    /// Reads a policy from its JSON form.
    ///
    /// `"allow"`, `"deny"` and `"discard"` select tokens, `{"substitute": v}`
    /// is an explicit substitute and any other value is a literal substitute.
    #[must_use]
    pub fn from_json(raw: serde_json::Value) -> Self {
        match raw.as_str() {
            Some("allow") => return Self::Allow,
            Some("deny") => return Self::Deny,
            Some("discard") => return Self::Discard,
            _ => {}
        }
        match raw {
            serde_json::Value::Object(mut entries)
                if entries.len() == 1 && entries.contains_key("substitute") =>
            {
                let value = entries.remove("substitute").unwrap_or_default();
                Self::Substitute(value.into())
            }
            other => Self::Substitute(other.into()),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Policy {
    /// `None` denies, `Some(v)` substitutes.
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Deny, |v| Self::Substitute(v.into()))
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            Self::Substitute(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("substitute", value)?;
                map.end()
            }
            token => serializer.serialize_str(token.name()),
        }
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from_json)
    }
}
