//! Filter tree construction.
//!
//! Trees are declared through builders that resolve each node's options
//! (kind defaults first, then the instance's own) and construct the node on
//! the spot. Two equivalent surfaces exist:
//!
//! - typed sugar: `.string("name", |o| o.max_length = Some(10))`, where the
//!   closure edits a copy of the kind's defaults;
//! - name dispatch: `.add_child("string", "name", overrides, None)`, where
//!   `overrides` is a JSON object assigned through [`Overlay`].
//!
//! Build errors do not interrupt a declaration; the first one is kept and
//! reported when the builder finishes.

use crate::error::BuildError;
use crate::filter::{
    AnyFilter, BooleanFilter, DateFilter, DecimalFilter, DuckFilter, FileFilter, Filter,
    FloatFilter, IntegerFilter, ListFilter, MapFilter, ModelFilter, StringFilter, TimeFilter,
};
use crate::kind::FilterKind;
use crate::models::ModelRegistry;
use crate::options::*;
use crate::schema::Schema;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Options given by name, as a JSON object.
pub type Overrides = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// BUILD CONTEXT
// ============================================================================

static STANDARD: Lazy<Arc<BuildContext>> = Lazy::new(|| {
    Arc::new(BuildContext::new(
        KindDefaults::standard(),
        ModelRegistry::new(),
    ))
});

/// Everything a build reads besides the declaration itself.
///
/// Shared by `Arc` between a schema, its builders and schemas derived from
/// it.
#[derive(Debug, Clone)]
pub struct BuildContext {
    defaults: Arc<KindDefaults>,
    models: ModelRegistry,
}

impl BuildContext {
    #[must_use]
    pub fn new(defaults: impl Into<Arc<KindDefaults>>, models: ModelRegistry) -> Self {
        Self {
            defaults: defaults.into(),
            models,
        }
    }

    /// Built-in defaults and the given model registry.
    #[must_use]
    pub fn with_models(models: ModelRegistry) -> Self {
        Self::new(KindDefaults::standard(), models)
    }

    /// Built-in defaults, no models.
    #[must_use]
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    #[must_use]
    pub fn defaults(&self) -> &KindDefaults {
        &self.defaults
    }

    #[must_use]
    pub const fn models(&self) -> &ModelRegistry {
        &self.models
    }
}

// ============================================================================
// LEAF KINDS
// ============================================================================

/// A leaf kind's options record, with the way to construct its filter.
trait LeafKind: Overlay {
    fn defaults(defaults: &KindDefaults) -> &Self;

    fn construct(
        self,
        key: Option<&str>,
        models: &ModelRegistry,
    ) -> Result<Arc<dyn Filter>, BuildError>;
}

macro_rules! leaf_kind {
    ($options:ty => $field:ident, $filter:ident) => {
        leaf_kind!($options => $field, |options, _key, _models| {
            Ok::<_, BuildError>($filter::new(options))
        });
    };
    ($options:ty => $field:ident, |$o:ident, $k:ident, $m:ident| $make:expr) => {
        impl LeafKind for $options {
            fn defaults(defaults: &KindDefaults) -> &Self {
                &defaults.$field
            }

            fn construct(
                self,
                $k: Option<&str>,
                $m: &ModelRegistry,
            ) -> Result<Arc<dyn Filter>, BuildError> {
                let $o = self;
                Ok(Arc::new($make?))
            }
        }
    };
}

leaf_kind!(AnyOptions => any, AnyFilter);
leaf_kind!(BooleanOptions => boolean, BooleanFilter);
leaf_kind!(StringOptions => string, |options, _key, _models| StringFilter::new(options));
leaf_kind!(IntegerOptions => integer, IntegerFilter);
leaf_kind!(FloatOptions => float, FloatFilter);
leaf_kind!(DecimalOptions => decimal, DecimalFilter);
leaf_kind!(DateOptions => date, |options, _key, _models| DateFilter::new(options));
leaf_kind!(TimeOptions => time, |options, _key, _models| TimeFilter::new(options));
leaf_kind!(DuckOptions => duck, DuckFilter);
leaf_kind!(FileOptions => file, FileFilter);
leaf_kind!(ModelOptions => model, |options, key, models| ModelFilter::new(options, key, models));

fn leaf<O: LeafKind>(
    ctx: &BuildContext,
    key: Option<&str>,
    configure: impl FnOnce(&mut O),
) -> Result<Arc<dyn Filter>, BuildError> {
    let mut options = O::defaults(ctx.defaults()).clone();
    configure(&mut options);
    options.construct(key, ctx.models())
}

fn list(
    ctx: &Arc<BuildContext>,
    key: Option<&str>,
    options: ListOptions,
    declare: impl FnOnce(&mut ElementBuilder),
) -> Result<Arc<dyn Filter>, BuildError> {
    let mut element = ElementBuilder::new(Arc::clone(ctx), key.map(str::to_owned));
    declare(&mut element);
    Ok(Arc::new(ListFilter::new(options, element.finish()?)))
}

fn map(
    ctx: &Arc<BuildContext>,
    options: MapOptions,
    declare: impl FnOnce(&mut MapBuilder),
) -> Result<Arc<dyn Filter>, BuildError> {
    let mut fields = MapBuilder::new(Arc::clone(ctx));
    declare(&mut fields);
    Ok(Arc::new(MapFilter::new(options, fields.finish()?)))
}

// ============================================================================
// KIND REGISTRY
// ============================================================================

/// A nested declaration, for name-dispatched composite kinds.
pub enum Nested<'a> {
    /// The fields of a map.
    Fields(Box<dyn FnOnce(&mut MapBuilder) + 'a>),
    /// The element filter of a list.
    Element(Box<dyn FnOnce(&mut ElementBuilder) + 'a>),
}

impl<'a> Nested<'a> {
    pub fn fields(declare: impl FnOnce(&mut MapBuilder) + 'a) -> Self {
        Self::Fields(Box::new(declare))
    }

    pub fn element(declare: impl FnOnce(&mut ElementBuilder) + 'a) -> Self {
        Self::Element(Box::new(declare))
    }

    const fn describe(&self) -> &'static str {
        match self {
            Self::Fields(_) => "a field block",
            Self::Element(_) => "an element block",
        }
    }

    fn unexpected(&self, kind: &'static str, key: Option<&str>) -> BuildError {
        BuildError::UnexpectedNested {
            kind,
            key: key.map(str::to_owned),
            nested: self.describe(),
        }
    }
}

impl fmt::Debug for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

type Construct = fn(
    &Arc<BuildContext>,
    Option<&str>,
    Overrides,
    Option<Nested<'_>>,
) -> Result<Arc<dyn Filter>, BuildError>;

static KINDS: [(FilterKind, Construct); 13] = [
    (FilterKind::Any, construct_leaf::<AnyOptions>),
    (FilterKind::Boolean, construct_leaf::<BooleanOptions>),
    (FilterKind::String, construct_leaf::<StringOptions>),
    (FilterKind::Integer, construct_leaf::<IntegerOptions>),
    (FilterKind::Float, construct_leaf::<FloatOptions>),
    (FilterKind::Decimal, construct_leaf::<DecimalOptions>),
    (FilterKind::Date, construct_leaf::<DateOptions>),
    (FilterKind::Time, construct_leaf::<TimeOptions>),
    (FilterKind::Duck, construct_leaf::<DuckOptions>),
    (FilterKind::File, construct_leaf::<FileOptions>),
    (FilterKind::Model, construct_leaf::<ModelOptions>),
    (FilterKind::List, construct_list),
    (FilterKind::Map, construct_map),
];

fn dispatch(
    ctx: &Arc<BuildContext>,
    kind: &str,
    key: Option<&str>,
    overrides: Overrides,
    nested: Option<Nested<'_>>,
) -> Result<Arc<dyn Filter>, BuildError> {
    let make = FilterKind::from_name(kind)
        .and_then(|kind| KINDS.iter().find(|(k, _)| *k == kind))
        .map(|(_, make)| *make)
        .ok_or_else(|| BuildError::UnknownKind(kind.to_owned()))?;
    make(ctx, key, overrides, nested)
}

fn construct_leaf<O: LeafKind>(
    ctx: &Arc<BuildContext>,
    key: Option<&str>,
    overrides: Overrides,
    nested: Option<Nested<'_>>,
) -> Result<Arc<dyn Filter>, BuildError> {
    if let Some(nested) = nested {
        return Err(nested.unexpected(O::KIND, key));
    }
    let mut options = O::defaults(ctx.defaults()).clone();
    options.overlay(overrides)?;
    options.construct(key, ctx.models())
}

fn construct_list(
    ctx: &Arc<BuildContext>,
    key: Option<&str>,
    overrides: Overrides,
    nested: Option<Nested<'_>>,
) -> Result<Arc<dyn Filter>, BuildError> {
    let mut options = ctx.defaults().list.clone();
    options.overlay(overrides)?;
    match nested {
        Some(Nested::Element(declare)) => list(ctx, key, options, declare),
        Some(nested) => Err(nested.unexpected(ListOptions::KIND, key)),
        None => Err(BuildError::MissingElement {
            key: key.map(str::to_owned),
        }),
    }
}

fn construct_map(
    ctx: &Arc<BuildContext>,
    key: Option<&str>,
    overrides: Overrides,
    nested: Option<Nested<'_>>,
) -> Result<Arc<dyn Filter>, BuildError> {
    let mut options = ctx.defaults().map.clone();
    options.overlay(overrides)?;
    match nested {
        Some(Nested::Fields(declare)) => map(ctx, options, declare),
        Some(nested) => Err(nested.unexpected(MapOptions::KIND, key)),
        None => map(ctx, options, |_| {}),
    }
}

// ============================================================================
// TYPED SUGAR
// ============================================================================

macro_rules! leaf_methods {
    (keyed $($(#[$meta:meta])* $method:ident($options:ty);)*) => {
        $(
            $(#[$meta])*
            pub fn $method(
                &mut self,
                key: impl Into<String>,
                configure: impl FnOnce(&mut $options),
            ) -> &mut Self {
                let key = key.into();
                let result = leaf::<$options>(&self.ctx, Some(&key), configure);
                self.record(key, result)
            }
        )*
    };
    (element $($(#[$meta:meta])* $method:ident($options:ty);)*) => {
        $(
            $(#[$meta])*
            pub fn $method(&mut self, configure: impl FnOnce(&mut $options)) -> &mut Self {
                let result = leaf::<$options>(&self.ctx, None, configure);
                self.record(result)
            }
        )*
    };
}

// ============================================================================
// MAP BUILDER
// ============================================================================

/// Declares the named children of a map (or of a schema).
pub struct MapBuilder {
    ctx: Arc<BuildContext>,
    children: IndexMap<String, Arc<dyn Filter>>,
    error: Option<BuildError>,
}

impl MapBuilder {
    #[must_use]
    pub fn new(ctx: Arc<BuildContext>) -> Self {
        Self::with_children(ctx, IndexMap::new())
    }

    pub(crate) fn with_children(
        ctx: Arc<BuildContext>,
        children: IndexMap<String, Arc<dyn Filter>>,
    ) -> Self {
        Self {
            ctx,
            children,
            error: None,
        }
    }

    #[must_use]
    pub fn context(&self) -> &Arc<BuildContext> {
        &self.ctx
    }

    /// Keys declared so far, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    leaf_methods! { keyed
        any(AnyOptions);
        boolean(BooleanOptions);
        string(StringOptions);
        integer(IntegerOptions);
        float(FloatOptions);
        decimal(DecimalOptions);
        date(DateOptions);
        time(TimeOptions);
        duck(DuckOptions);
        file(FileOptions);
        /// The model class defaults to the camel-cased key.
        model(ModelOptions);
    }

    /// A list child; `element` declares the element filter.
    pub fn list(
        &mut self,
        key: impl Into<String>,
        configure: impl FnOnce(&mut ListOptions),
        element: impl FnOnce(&mut ElementBuilder),
    ) -> &mut Self {
        let key = key.into();
        let mut options = self.ctx.defaults().list.clone();
        configure(&mut options);
        let result = list(&self.ctx, Some(&key), options, element);
        self.record(key, result)
    }

    /// A map child; `fields` declares its children.
    pub fn map(
        &mut self,
        key: impl Into<String>,
        configure: impl FnOnce(&mut MapOptions),
        fields: impl FnOnce(&mut MapBuilder),
    ) -> &mut Self {
        let key = key.into();
        let mut options = self.ctx.defaults().map.clone();
        configure(&mut options);
        let result = map(&self.ctx, options, fields);
        self.record(key, result)
    }

    /// A child built elsewhere, custom kinds included.
    pub fn filter(&mut self, key: impl Into<String>, filter: Arc<dyn Filter>) -> &mut Self {
        self.record(key.into(), Ok(filter))
    }

    /// A child of a kind given by name, with options given by name.
    pub fn add_child(
        &mut self,
        kind: &str,
        key: impl Into<String>,
        overrides: Overrides,
        nested: Option<Nested<'_>>,
    ) -> &mut Self {
        let key = key.into();
        let result = dispatch(&self.ctx, kind, Some(&key), overrides, nested);
        self.record(key, result)
    }

    /// The declared children, or the first build error.
    pub fn finish(self) -> Result<IndexMap<String, Arc<dyn Filter>>, BuildError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.children),
        }
    }

    fn record(&mut self, key: String, result: Result<Arc<dyn Filter>, BuildError>) -> &mut Self {
        match result {
            Ok(filter) => {
                let kind = filter.kind();
                if let Some(previous) = self.children.get_mut(&key) {
                    tracing::debug!(
                        key = %key,
                        from = %previous.kind(),
                        to = %kind,
                        "replaced declared filter"
                    );
                    *previous = filter;
                } else {
                    self.children.insert(key, filter);
                }
            }
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }
}

impl fmt::Debug for MapBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapBuilder")
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ELEMENT BUILDER
// ============================================================================

/// Declares the single, unnamed element filter of a list.
///
/// Declaring twice keeps the last declaration.
pub struct ElementBuilder {
    ctx: Arc<BuildContext>,
    key: Option<String>,
    element: Option<Arc<dyn Filter>>,
    error: Option<BuildError>,
}

impl ElementBuilder {
    /// `key` is the owning list's key, used in diagnostics.
    #[must_use]
    pub fn new(ctx: Arc<BuildContext>, key: Option<String>) -> Self {
        Self {
            ctx,
            key,
            element: None,
            error: None,
        }
    }

    leaf_methods! { element
        any(AnyOptions);
        boolean(BooleanOptions);
        string(StringOptions);
        integer(IntegerOptions);
        float(FloatOptions);
        decimal(DecimalOptions);
        date(DateOptions);
        time(TimeOptions);
        duck(DuckOptions);
        file(FileOptions);
        /// Elements have no key, so the `class` option is required.
        model(ModelOptions);
    }

    pub fn list(
        &mut self,
        configure: impl FnOnce(&mut ListOptions),
        element: impl FnOnce(&mut ElementBuilder),
    ) -> &mut Self {
        let mut options = self.ctx.defaults().list.clone();
        configure(&mut options);
        let result = list(&self.ctx, self.key.as_deref(), options, element);
        self.record(result)
    }

    pub fn map(
        &mut self,
        configure: impl FnOnce(&mut MapOptions),
        fields: impl FnOnce(&mut MapBuilder),
    ) -> &mut Self {
        let mut options = self.ctx.defaults().map.clone();
        configure(&mut options);
        let result = map(&self.ctx, options, fields);
        self.record(result)
    }

    pub fn filter(&mut self, filter: Arc<dyn Filter>) -> &mut Self {
        self.record(Ok(filter))
    }

    /// An element of a kind given by name, with options given by name.
    pub fn add(&mut self, kind: &str, overrides: Overrides, nested: Option<Nested<'_>>) -> &mut Self {
        let result = dispatch(&self.ctx, kind, None, overrides, nested);
        self.record(result)
    }

    /// The element filter, or the first build error.
    pub fn finish(self) -> Result<Arc<dyn Filter>, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.element
            .ok_or(BuildError::MissingElement { key: self.key })
    }

    fn record(&mut self, result: Result<Arc<dyn Filter>, BuildError>) -> &mut Self {
        match result {
            Ok(filter) => {
                let kind = filter.kind();
                if let Some(previous) = self.element.replace(filter) {
                    tracing::debug!(
                        list = self.key.as_deref().unwrap_or("-"),
                        from = %previous.kind(),
                        to = %kind,
                        "replaced element filter"
                    );
                }
            }
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }
}

impl fmt::Debug for ElementBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBuilder")
            .field("key", &self.key)
            .field("element", &self.element)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SCHEMA BUILDER
// ============================================================================

/// Builds a [`Schema`].
///
/// Field blocks accumulate: later blocks add children and replace earlier
/// children with the same key.
///
/// ```rust
/// use sift::{BuildContext, FilterKind, SchemaBuilder};
///
/// let schema = SchemaBuilder::new(BuildContext::standard())
///     .fields(|f| {
///         f.string("a", |_| {});
///     })
///     .fields(|f| {
///         f.integer("a", |_| {});
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 1);
/// assert_eq!(schema.get("a").unwrap().kind(), FilterKind::Integer);
/// ```
#[derive(Debug)]
#[must_use = "builder methods must be chained or built"]
pub struct SchemaBuilder {
    fields: MapBuilder,
}

impl SchemaBuilder {
    pub fn new(ctx: Arc<BuildContext>) -> Self {
        Self {
            fields: MapBuilder::new(ctx),
        }
    }

    pub(crate) fn with_children(
        ctx: Arc<BuildContext>,
        children: IndexMap<String, Arc<dyn Filter>>,
    ) -> Self {
        Self {
            fields: MapBuilder::with_children(ctx, children),
        }
    }

    pub fn fields(mut self, declare: impl FnOnce(&mut MapBuilder)) -> Self {
        declare(&mut self.fields);
        self
    }

    pub fn build(self) -> Result<Schema, BuildError> {
        let ctx = Arc::clone(self.fields.context());
        Ok(Schema::from_parts(ctx, self.fields.finish()?))
    }
}
