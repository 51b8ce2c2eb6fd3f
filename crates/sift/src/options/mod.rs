//! Options resolution.
//!
//! Every filter kind has a typed options record: [`CommonOptions`] (the four
//! policies plus `strict`) and the kind's own fields. Records start from the
//! kind's entry in [`KindDefaults`] and are overlaid with instance options,
//! either by a typed closure in the builder or by name through [`Overlay`].
//! A filter's options are fixed once the filter is built.

use crate::error::OptionError;
use crate::policy::Policy;
use serde::de::DeserializeOwned;

// ============================================================================
// COMMON OPTIONS
// ============================================================================

/// Options shared by every kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommonOptions {
    /// Reaction to a null value.
    pub nils: Policy,
    /// Reaction to a value that fails coercion.
    pub invalid: Policy,
    /// Reaction to a value that coerces to blank.
    pub empty: Policy,
    /// Reaction to a key absent from the parent map.
    pub missing: Policy,
    /// Skip coercion; the raw value must already have the target type.
    pub strict: bool,
}

impl CommonOptions {
    /// The four policies by option name.
    #[must_use]
    pub const fn policies(&self) -> [(&'static str, &Policy); 4] {
        [
            ("nils", &self.nils),
            ("invalid", &self.invalid),
            ("empty", &self.empty),
            ("missing", &self.missing),
        ]
    }

    /// Assigns a common option by name.
    pub fn set(
        &mut self,
        kind: &'static str,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), OptionError> {
        match name {
            "nils" => self.nils = Policy::from_json(value),
            "invalid" => self.invalid = Policy::from_json(value),
            "empty" => self.empty = Policy::from_json(value),
            "missing" => self.missing = Policy::from_json(value),
            "strict" => self.strict = decode(kind, name, value)?,
            _ => {
                return Err(OptionError::Unknown {
                    kind,
                    name: name.to_owned(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// OVERLAY
// ============================================================================

/// A kind's options record, assignable by option name.
pub trait Overlay: Clone + Send + Sync + 'static {
    /// Kind name used in configuration and diagnostics.
    const KIND: &'static str;

    fn common(&self) -> &CommonOptions;

    fn common_mut(&mut self) -> &mut CommonOptions;

    /// Assigns one option. Names not owned by the kind fall through to
    /// [`CommonOptions::set`].
    fn set(&mut self, name: &str, value: serde_json::Value) -> Result<(), OptionError>;

    /// Assigns every entry, in order. Stops at the first failure.
    fn overlay(
        &mut self,
        entries: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), OptionError> {
        for (name, value) in entries {
            self.set(&name, value)?;
        }
        Ok(())
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    kind: &'static str,
    name: &str,
    value: serde_json::Value,
) -> Result<T, OptionError> {
    serde_json::from_value(value).map_err(|err| OptionError::InvalidValue {
        kind,
        name: name.to_owned(),
        reason: err.to_string(),
    })
}

// ============================================================================
// FILTER OPTIONS MACRO
// ============================================================================

/// Declares a kind's options record: the struct (with `common` first), its
/// `Default` (kind defaults, plus overrides of the all-`Deny` common
/// defaults) and its [`Overlay`] implementation.
///
/// ```rust,ignore
/// filter_options! {
///     /// Options for the list kind.
///     pub struct ListOptions as "list" {
///         /// Wrap a non-list value into a one-element list.
///         wrap: bool = false,
///     }
///     common { empty: Policy::Allow }
/// }
/// ```
macro_rules! filter_options {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $kind:literal {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $fty:ty = $default:expr
            ),* $(,)?
        }
        $(common { $($cfield:ident : $cvalue:expr),* $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            pub common: $crate::options::CommonOptions,
            $(
                $(#[$fmeta])*
                pub $field: $fty,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                #[allow(unused_mut)]
                let mut common = $crate::options::CommonOptions::default();
                $($(common.$cfield = $cvalue;)*)?
                Self {
                    common,
                    $($field: $default,)*
                }
            }
        }

        impl $crate::options::Overlay for $name {
            const KIND: &'static str = $kind;

            fn common(&self) -> &$crate::options::CommonOptions {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::options::CommonOptions {
                &mut self.common
            }

            fn set(
                &mut self,
                name: &str,
                value: serde_json::Value,
            ) -> Result<(), $crate::error::OptionError> {
                $(
                    if name == stringify!($field) {
                        self.$field = $crate::options::decode(Self::KIND, name, value)?;
                        return Ok(());
                    }
                )*
                self.common.set(Self::KIND, name, value)
            }
        }
    };
}

mod defaults;
mod kinds;

pub use defaults::KindDefaults;
pub use kinds::*;
