//! Model class registry.
//!
//! Model filters check that a host value is of a particular Rust type. The
//! type is looked up by class name when the filter is built, never while
//! feeding, so built trees hold no caches.

use sift_value::HostObject;
use std::any::{TypeId, type_name};
use std::collections::HashMap;

/// A registered model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelType {
    type_id: TypeId,
    rust_name: &'static str,
}

impl ModelType {
    #[must_use]
    pub fn of<T: HostObject>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            rust_name: type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified Rust type name, for diagnostics.
    #[must_use]
    pub const fn rust_name(&self) -> &'static str {
        self.rust_name
    }
}

/// Class names mapped to host types.
///
/// ```rust
/// use sift::{HostObject, ModelRegistry};
///
/// #[derive(Debug)]
/// struct Account;
///
/// impl HostObject for Account {
///     fn type_name(&self) -> &str { "Account" }
/// }
///
/// let mut models = ModelRegistry::new();
/// models.register::<Account>("Account");
/// assert!(models.resolve("Account").is_some());
/// assert!(models.resolve("User").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    types: HashMap<String, ModelType>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `class`, replacing any earlier registration.
    pub fn register<T: HostObject>(&mut self, class: impl Into<String>) -> &mut Self {
        let class = class.into();
        let model = ModelType::of::<T>();
        tracing::debug!(class = %class, rust_type = model.rust_name(), "registered model type");
        self.types.insert(class, model);
        self
    }

    #[must_use]
    pub fn resolve(&self, class: &str) -> Option<ModelType> {
        self.types.get(class).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// `"user_account"` becomes `"UserAccount"`.
pub(crate) fn camelize(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}
