//! Leaf errors.

use super::code::ErrorCode;
use super::messages::MessageFormatter;
use std::borrow::Cow;

/// A single failure at a leaf filter.
///
/// `key` is set when the atom sits directly under a map, `index` when it sits
/// directly under a list. A precomputed `message` takes precedence over any
/// formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAtom {
    pub key: Option<String>,
    pub code: ErrorCode,
    pub message: Option<Cow<'static, str>>,
    pub index: Option<usize>,
}

impl ErrorAtom {
    #[must_use]
    pub const fn new(code: ErrorCode) -> Self {
        Self {
            key: None,
            code,
            message: None,
            index: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Renders the atom, filling absent context from its parents.
    pub(crate) fn render(
        &self,
        formatter: &dyn MessageFormatter,
        key: Option<&str>,
        index: Option<usize>,
    ) -> String {
        match &self.message {
            Some(message) => message.to_string(),
            None => formatter.format(
                self.key.as_deref().or(key),
                &self.code,
                self.index.or(index),
            ),
        }
    }
}

impl From<ErrorCode> for ErrorAtom {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}
