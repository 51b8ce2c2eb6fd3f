//! Fatal errors.
//!
//! These cover programmer and configuration mistakes only: declaring a tree
//! that cannot be built, loading broken configuration, or feeding a root
//! something that is not key-value enumerable. Problems with the *data* being
//! fed are never reported through these types; they become atoms in the
//! [error tree](crate::errors).

use crate::errors::{DefaultMessages, ErrorMap};
use crate::kind::FilterKind;
use sift_value::ValueKind;

// ============================================================================
// OPTION ERRORS
// ============================================================================

/// A named option could not be assigned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum OptionError {
    /// The kind has no option with this name.
    #[error("unknown option `{name}` for {kind} filters")]
    Unknown { kind: &'static str, name: String },

    /// The value does not decode into the option's type.
    #[error("invalid value for option `{name}` of {kind} filters: {reason}")]
    InvalidValue {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

// ============================================================================
// BUILD ERRORS
// ============================================================================

/// A filter tree could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// No built-in kind has this name.
    #[error("unknown filter kind `{0}`")]
    UnknownKind(String),

    /// The model class is not registered.
    #[error("unknown model class `{class}`")]
    UnknownModel { class: String },

    /// A model filter has neither a `class` option nor a key to derive one from.
    #[error("model filter needs a `class` option or a key")]
    MissingModelClass,

    /// The `pattern` option is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The `format` option is not a valid strftime format.
    #[error("invalid {kind} format `{format}`")]
    InvalidFormat { kind: &'static str, format: String },

    /// A list was declared without an element filter.
    #[error("list filter{} has no element filter", key_suffix(.key.as_deref()))]
    MissingElement { key: Option<String> },

    /// A nested declaration was given to a kind that cannot hold it.
    #[error("{kind} filter{} does not accept {nested}", key_suffix(.key.as_deref()))]
    UnexpectedNested {
        kind: &'static str,
        key: Option<String>,
        nested: &'static str,
    },

    /// A filter fed outside any composite uses `Discard`, which only a
    /// composite parent can act on.
    #[error("`{option}: discard` needs a list or map parent")]
    DiscardAtTopLevel { option: &'static str },

    #[error(transparent)]
    Option(#[from] OptionError),
}

fn key_suffix(key: Option<&str>) -> String {
    key.map(|key| format!(" `{key}`")).unwrap_or_default()
}

// ============================================================================
// CONFIG ERRORS
// ============================================================================

/// Kind defaults could not be loaded.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to parse kind defaults: {0}")]
    Parse(#[from] toml::de::Error),

    /// A top-level section does not name a built-in kind.
    #[error("unknown filter kind `{0}` in kind defaults")]
    UnknownKind(String),

    /// A top-level entry is not a table.
    #[error("kind defaults section `{0}` must be a table")]
    InvalidSection(String),

    #[error(transparent)]
    Option(#[from] OptionError),
}

// ============================================================================
// FEED ERRORS
// ============================================================================

/// A filter was fed something its position cannot handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FeedError {
    /// A root argument is not key-value enumerable.
    #[error("argument {position} is a {kind}; schema arguments must be maps")]
    NotKeyValue { position: usize, kind: ValueKind },

    /// A standalone filter asked to omit its value. Only a list or map
    /// parent can act on that.
    #[error("{kind} filter discarded its value with no list or map parent")]
    Discarded { kind: FilterKind },
}

/// A failed [`Outcome`](crate::Outcome) turned into an error.
///
/// Display lists every message rendered with [`DefaultMessages`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("validation failed: {}", .messages.join("; "))]
pub struct ValidationFailed {
    pub errors: ErrorMap,
    pub messages: Vec<String>,
}

impl ValidationFailed {
    #[must_use]
    pub fn new(errors: ErrorMap) -> Self {
        let messages = errors.flattened_messages(&DefaultMessages);
        Self { errors, messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorAtom, ErrorCode, ErrorNode};

    #[test]
    fn build_error_names_the_key() {
        let err = BuildError::MissingElement {
            key: Some("tags".into()),
        };
        assert_eq!(err.to_string(), "list filter `tags` has no element filter");

        let err = BuildError::MissingElement { key: None };
        assert_eq!(err.to_string(), "list filter has no element filter");
    }

    #[test]
    fn option_error_converts_into_build_error() {
        let err: BuildError = OptionError::Unknown {
            kind: "string",
            name: "maximum".into(),
        }
        .into();
        assert_eq!(err.to_string(), "unknown option `maximum` for string filters");
    }

    #[test]
    fn validation_failed_lists_default_messages() {
        let mut errors = ErrorMap::new();
        errors.insert(
            "email",
            ErrorNode::Atom(ErrorAtom::new(ErrorCode::REQUIRED).with_key("email")),
        );
        let failed = ValidationFailed::new(errors);
        assert_eq!(failed.to_string(), "validation failed: Email is required");
    }
}
