//! Caller-owned objects carried through a value tree.

use crate::Map;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// An object owned by the caller that filters inspect but never convert.
///
/// Model, duck and file filters look at hosts through this trait: the model
/// kind compares the concrete Rust type, the duck kind asks for named
/// capabilities and the file kind asks for `read`/`size` plus a byte size.
///
/// ```rust
/// use sift_value::{Host, HostObject, Value};
///
/// #[derive(Debug)]
/// struct Upload { bytes: Vec<u8> }
///
/// impl HostObject for Upload {
///     fn type_name(&self) -> &str { "Upload" }
///     fn has_capability(&self, capability: &str) -> bool {
///         matches!(capability, "read" | "size")
///     }
///     fn byte_size(&self) -> Option<u64> { Some(self.bytes.len() as u64) }
/// }
///
/// let value = Value::Host(Host::new(Upload { bytes: vec![1, 2, 3] }));
/// assert!(value.has_capability("read"));
/// ```
pub trait HostObject: Any + fmt::Debug + Send + Sync {
    /// Human-readable type name, used in serialization and diagnostics.
    fn type_name(&self) -> &str;

    /// Whether the object supports the named capability.
    fn has_capability(&self, _capability: &str) -> bool {
        false
    }

    /// `Some(false)` for records that have not been saved yet.
    fn is_persisted(&self) -> Option<bool> {
        None
    }

    /// Size in bytes, for file-like objects.
    fn byte_size(&self) -> Option<u64> {
        None
    }

    /// Key-value view of the object, for hosts accepted as schema arguments.
    fn entries(&self) -> Option<Map> {
        None
    }
}

/// Shared handle to a [`HostObject`].
///
/// Cloning is cheap; equality is identity.
#[derive(Clone)]
pub struct Host(Arc<dyn HostObject>);

impl Host {
    /// Wraps an object.
    pub fn new<T: HostObject>(object: T) -> Self {
        Self(Arc::new(object))
    }

    /// Wraps an already shared object.
    pub fn from_arc(object: Arc<dyn HostObject>) -> Self {
        Self(object)
    }

    /// The wrapped object.
    #[must_use]
    pub fn object(&self) -> &dyn HostObject {
        &*self.0
    }

    /// `TypeId` of the concrete wrapped type.
    #[must_use]
    pub fn concrete_type(&self) -> TypeId {
        let any: &dyn Any = &*self.0;
        any.type_id()
    }

    /// Borrows the object as its concrete type.
    #[must_use]
    pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
