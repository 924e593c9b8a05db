use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::hash::{Hash, Hasher};

/// [`TypeId`] equivalent that can be stored in a `const` type descriptor.
///
/// The id is computed lazily through a function pointer, since descriptors are
/// built in const contexts.
#[derive(Copy, Clone)]
pub struct TypeKey {
    type_id_fn: fn() -> TypeId,
}

impl TypeKey {
    /// Create a [`TypeKey`] for a type.
    #[must_use]
    pub const fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        TypeKey {
            type_id_fn: TypeId::of::<T>,
        }
    }

    /// Get the underlying [`TypeId`] for this `TypeKey`.
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

impl Debug for TypeKey {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.get(), formatter)
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl PartialEq<TypeId> for TypeKey {
    #[inline]
    fn eq(&self, other: &TypeId) -> bool {
        self.get() == *other
    }
}

impl Eq for TypeKey {}

impl PartialOrd for TypeKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl Ord for TypeKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.get(), &other.get())
    }
}

impl Hash for TypeKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Generic fn pointers may be duplicated across codegen units, so hash
        // the TypeId itself to stay consistent with `Eq`.
        self.get().hash(state);
    }
}
