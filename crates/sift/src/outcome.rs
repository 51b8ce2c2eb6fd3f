//! The result of feeding a schema.

use crate::error::ValidationFailed;
use crate::errors::ErrorMap;
use sift_value::Map;

/// Coerced inputs, plus the error tree when any field failed.
///
/// `inputs` holds every field that succeeded, even when others failed, so
/// partial results stay usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    inputs: Map,
    errors: Option<ErrorMap>,
}

impl Outcome {
    /// An empty error map counts as success.
    #[must_use]
    pub fn new(inputs: Map, errors: ErrorMap) -> Self {
        Self {
            inputs,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_none()
    }

    #[must_use]
    pub const fn inputs(&self) -> &Map {
        &self.inputs
    }

    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorMap> {
        self.errors.as_ref()
    }

    #[must_use]
    pub fn into_parts(self) -> (Map, Option<ErrorMap>) {
        (self.inputs, self.errors)
    }

    /// The inputs, or the errors as a [`ValidationFailed`].
    pub fn into_result(self) -> Result<Map, ValidationFailed> {
        match self.errors {
            None => Ok(self.inputs),
            Some(errors) => Err(ValidationFailed::new(errors)),
        }
    }
}
