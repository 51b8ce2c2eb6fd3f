use super::{Coercion, Filter};
use crate::error::BuildError;
use crate::errors::ErrorCode;
use crate::kind::FilterKind;
use crate::models::{ModelRegistry, ModelType, camelize};
use crate::options::{CommonOptions, ModelOptions};
use sift_value::Value;

/// Accepts hosts of one registered model type.
#[derive(Debug, Clone)]
pub struct ModelFilter {
    options: ModelOptions,
    model: ModelType,
}

impl ModelFilter {
    /// Resolves the model class: the `class` option, or the camel-cased key.
    pub fn new(
        options: ModelOptions,
        key: Option<&str>,
        models: &ModelRegistry,
    ) -> Result<Self, BuildError> {
        let class = match (&options.class, key) {
            (Some(class), _) => class.clone(),
            (None, Some(key)) => camelize(key),
            (None, None) => return Err(BuildError::MissingModelClass),
        };
        let model = models
            .resolve(&class)
            .ok_or(BuildError::UnknownModel { class })?;
        Ok(Self { options, model })
    }

    #[must_use]
    pub const fn model(&self) -> ModelType {
        self.model
    }
}

impl Filter for ModelFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Model
    }

    fn common(&self) -> &CommonOptions {
        &self.options.common
    }

    fn type_code(&self) -> ErrorCode {
        ErrorCode::WRONG_CLASS
    }

    fn coerce(&self, raw: Value) -> Coercion {
        if self.conforms(&raw) {
            Coercion::Value(raw)
        } else {
            Coercion::invalid(raw, ErrorCode::WRONG_CLASS)
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        value
            .as_host()
            .is_some_and(|host| host.concrete_type() == self.model.type_id())
    }

    fn validate(&self, value: &Value) -> Option<ErrorCode> {
        let persisted = value.as_host()?.object().is_persisted();
        (!self.options.new_records && persisted == Some(false)).then_some(ErrorCode::NOT_PERSISTED)
    }
}
