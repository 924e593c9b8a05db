use core::any::Any;
use core::fmt::Debug;

use serde_json::Value;

use crate::{Built, BuildError, FieldDecl, Mode, TypeDesc};

/// A value the construction engine can allocate and populate at runtime.
///
/// This is the object-safe half of [`Model`]: strategies work on
/// `Box<dyn Instance>` and only callers downcast to concrete types.
pub trait Instance: Any + Debug {
    /// Descriptor of the runtime type of this instance.
    fn desc(&self) -> &'static TypeDesc;

    /// Assigns a built value to the field called `name`.
    ///
    /// Returns `Ok(false)` if neither this type nor any of its ancestors has a
    /// field by that name.
    fn set_field(&mut self, name: &str, value: Built) -> Result<bool, BuildError>;
}

impl dyn Instance {
    /// Returns true if the instance is a `T`.
    pub fn is<T: Instance>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Returns a reference to the instance as a `T`, if it is one.
    pub fn downcast_ref<T: Instance>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Converts the boxed instance into a `T`, handing the box back on mismatch.
    pub fn downcast<T: Instance>(self: Box<Self>) -> Result<T, Box<dyn Instance>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            match any.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(_) => unreachable!("type checked above"),
            }
        } else {
            Err(self)
        }
    }
}

/// A type with a static descriptor.
///
/// Implemented by the [`model!`](crate::model) macro and by the built-in
/// [`Date`](crate::Date).
pub trait Model: Instance + Sized {
    /// The descriptor of this type.
    const DESC: &'static TypeDesc;
}

/// Static-type introspection for field types.
///
/// `#[build]` without an argument rebuilds a field into the element type
/// reported here: a model reports itself, containers report their element, and
/// plain data reports nothing.
pub trait FieldType {
    /// Returns the model type values of this type are built from, if any.
    fn element() -> Option<&'static TypeDesc>;
}

/// Types that decode the raw document themselves.
///
/// Used by the constructor-passthrough strategy.
pub trait FromDocument: Sized {
    /// Builds a value from the raw, unmodified document.
    fn from_document(document: &Value) -> Result<Self, BuildError>;
}

/// The recursion entry points, as seen by construction strategies.
pub trait Materialize {
    /// Builds `document` into an instance of `ty`, passing null and absence
    /// through unchanged.
    fn build_model(
        &self,
        document: Option<&Value>,
        ty: &'static TypeDesc,
    ) -> Result<Built, BuildError>;

    /// Builds every element of `items` into an instance of `ty`.
    fn build_array(&self, items: &[Value], ty: &'static TypeDesc)
    -> Result<Vec<Built>, BuildError>;

    /// Resolves the element type of `field` for `instance`, through the
    /// instance's runtime type and all of its ancestors.
    fn lookup_field_type(&self, instance: &dyn Instance, field: &str) -> Option<FieldDecl>;

    /// How forgiving construction is.
    fn mode(&self) -> Mode;
}

/// Returns the descriptor of `T`, as a function pointer usable in descriptors.
pub fn desc_of<T: Model>() -> &'static TypeDesc {
    T::DESC
}

/// Zero-argument constructor for any `Default` instance type.
pub fn default_instance<T: Instance + Default>() -> Box<dyn Instance> {
    Box::new(T::default())
}

/// Document constructor for any [`FromDocument`] instance type.
pub fn construct_instance<T: Instance + FromDocument>(
    document: &Value,
) -> Result<Box<dyn Instance>, BuildError> {
    Ok(Box::new(T::from_document(document)?))
}
