use super::TypeDesc;

/// Describes a field of a model struct.
#[derive(Clone, Copy, Debug)]
pub struct FieldDesc {
    /// key of the field, as it appears in documents
    pub name: &'static str,

    /// element type of the field's static Rust type, if that type is a model
    ///
    /// the layer of indirection allows for recursive model definitions
    pub shape: fn() -> Option<&'static TypeDesc>,

    /// the `#[build]` annotation on the field, if any
    pub build: Option<BuildAttr>,
}

impl FieldDesc {
    /// Returns the element type this field's annotation asks for, if it can be
    /// resolved. An unannotated field never resolves.
    pub fn element(&self) -> Option<&'static TypeDesc> {
        match self.build? {
            BuildAttr::Inferred => (self.shape)(),
            BuildAttr::Explicit(elem) => Some(elem()),
        }
    }
}

/// The `#[build]` annotation on a field.
#[derive(Clone, Copy, Debug)]
pub enum BuildAttr {
    /// `#[build]`: rebuild values into the field's own static type.
    Inferred,

    /// `#[build(T)]`: rebuild values into `T`, whatever the field's static type.
    Explicit(fn() -> &'static TypeDesc),
}

/// A field declaration as recorded in a metadata store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDecl {
    /// Values of the field are rebuilt into this type.
    Resolved(&'static TypeDesc),

    /// The field is annotated with `#[build]` but its static type is not a
    /// model, so there is nothing to rebuild into.
    Unresolved,
}

impl FieldDecl {
    /// The element type, if resolved.
    pub fn element(self) -> Option<&'static TypeDesc> {
        match self {
            FieldDecl::Resolved(element) => Some(element),
            FieldDecl::Unresolved => None,
        }
    }
}
