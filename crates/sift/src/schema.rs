//! The root of a filter tree.

use crate::builder::{BuildContext, MapBuilder, SchemaBuilder};
use crate::error::{BuildError, FeedError};
use crate::filter::{Filter, MapFilter};
use crate::options::MapOptions;
use crate::outcome::Outcome;
use indexmap::IndexMap;
use sift_value::{Map, Value};
use std::sync::Arc;

/// A declared filter tree, ready to be fed.
///
/// The root behaves like a map filter, except that it takes any number of
/// argument maps, merges them and never resolves policies of its own.
/// Schemas are immutable; [`derive`](Schema::derive) starts a new schema from
/// this one's children.
#[derive(Debug, Clone)]
pub struct Schema {
    ctx: Arc<BuildContext>,
    root: MapFilter,
}

impl Schema {
    /// Declares a schema with the standard build context.
    pub fn build(declare: impl FnOnce(&mut MapBuilder)) -> Result<Self, BuildError> {
        Self::build_in(BuildContext::standard(), declare)
    }

    pub fn build_in(
        ctx: Arc<BuildContext>,
        declare: impl FnOnce(&mut MapBuilder),
    ) -> Result<Self, BuildError> {
        SchemaBuilder::new(ctx).fields(declare).build()
    }

    pub(crate) fn from_parts(
        ctx: Arc<BuildContext>,
        children: IndexMap<String, Arc<dyn Filter>>,
    ) -> Self {
        Self {
            ctx,
            root: MapFilter::new(MapOptions::default(), children),
        }
    }

    /// A builder over this schema's children.
    ///
    /// Children are shared, not copied; declaring an existing key in the
    /// derived schema replaces it there and leaves this schema untouched.
    pub fn derive(&self) -> SchemaBuilder {
        SchemaBuilder::with_children(Arc::clone(&self.ctx), self.root.fields().clone())
    }

    /// Shorthand for `derive().fields(declare).build()`.
    pub fn extend(&self, declare: impl FnOnce(&mut MapBuilder)) -> Result<Self, BuildError> {
        self.derive().fields(declare).build()
    }

    #[must_use]
    pub fn context(&self) -> &Arc<BuildContext> {
        &self.ctx
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.fields().keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn Filter>> {
        self.root.fields().get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.root.fields().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.fields().is_empty()
    }

    /// Merges the arguments left to right and feeds every declared field.
    ///
    /// Each argument must be a map or a host with entries. Later arguments
    /// win per key; when both sides hold a map for a key, the two maps are
    /// merged the same way, one level deep.
    pub fn feed<I>(&self, args: I) -> Result<Outcome, FeedError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let data = merge_args(args)?;
        let supplied = data.len();
        let (inputs, errors) = self.root.feed_fields(data);
        tracing::trace!(
            supplied,
            declared = self.len(),
            accepted = inputs.len(),
            errors = errors.len(),
            "fed schema"
        );
        Ok(Outcome::new(inputs, errors))
    }
}

fn merge_args<I>(args: I) -> Result<Map, FeedError>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut merged = Map::new();
    for (position, arg) in args.into_iter().enumerate() {
        let entries = match arg.into() {
            Value::Map(entries) => entries,
            Value::Host(host) => host.object().entries().ok_or(FeedError::NotKeyValue {
                position,
                kind: sift_value::ValueKind::Host,
            })?,
            other => {
                return Err(FeedError::NotKeyValue {
                    position,
                    kind: other.kind(),
                });
            }
        };
        for (key, value) in entries {
            match (merged.get_mut(&key), value) {
                (Some(Value::Map(existing)), Value::Map(incoming)) => existing.extend(incoming),
                (_, value) => {
                    merged.insert(key, value);
                }
            }
        }
    }
    Ok(merged)
}
