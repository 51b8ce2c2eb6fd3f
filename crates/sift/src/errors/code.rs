//! Symbolic error codes.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A symbolic failure reason such as `too_short` or `required`.
///
/// The built-in taxonomy is available as associated constants; custom
/// filters may use any other code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(Cow<'static, str>);

macro_rules! codes {
    ($($(#[$meta:meta])* $name:ident = $code:literal;)*) => {
        impl ErrorCode {
            $(
                $(#[$meta])*
                pub const $name: Self = Self(Cow::Borrowed($code));
            )*
        }
    };
}

codes! {
    /// A declared key was absent.
    REQUIRED = "required";
    /// The value was null.
    NILS = "nils";
    /// The value was blank after coercion.
    EMPTY = "empty";
    WRONG_TYPE = "wrong_type";
    NOT_A_BOOLEAN = "not_a_boolean";
    NOT_AN_INTEGER = "not_an_integer";
    NOT_A_NUMBER = "not_a_number";
    MALFORMED_DATE = "malformed_date";
    MALFORMED_TIME = "malformed_time";
    NOT_A_LIST = "not_a_list";
    NOT_A_MAP = "not_a_map";
    MISSING_CAPABILITY = "missing_capability";
    NOT_A_FILE = "not_a_file";
    WRONG_CLASS = "wrong_class";
    TOO_SHORT = "too_short";
    TOO_LONG = "too_long";
    NOT_IN_SET = "not_in_set";
    PATTERN_MISMATCH = "pattern_mismatch";
    OUT_OF_RANGE = "out_of_range";
    /// More decimal places than the `scale` option allows.
    TOO_PRECISE = "too_precise";
    BEFORE_BOUND = "before_bound";
    AFTER_BOUND = "after_bound";
    TOO_LARGE = "too_large";
    /// A model record that has not been saved.
    NOT_PERSISTED = "not_persisted";
}

impl ErrorCode {
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ErrorCode {
    fn from(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
