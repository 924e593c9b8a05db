use core::fmt;

use serde_json::Value;

use super::{FieldDesc, Strategy, TypeKey};
use crate::{BuildError, Instance};

/// Allocates a fresh instance through the type's zero-argument constructor.
pub type DefaultFn = fn() -> Box<dyn Instance>;

/// Allocates an instance by handing the raw document to the type.
pub type FromDocumentFn = fn(&Value) -> Result<Box<dyn Instance>, BuildError>;

/// Constructors a type exposes to the construction strategies.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeVTable {
    /// zero-argument constructor, used by the property-copy strategy
    pub default: Option<DefaultFn>,

    /// document constructor, used by the constructor-passthrough strategy
    pub from_document: Option<FromDocumentFn>,
}

impl TypeVTable {
    /// A vtable with no constructors at all.
    pub const EMPTY: Self = Self {
        default: None,
        from_document: None,
    };
}

/// Static description of a constructible type.
///
/// Descriptors are compared by identity: two descriptors are equal iff they
/// describe the same Rust type.
#[derive(Clone, Copy)]
pub struct TypeDesc {
    /// Unique type identifier from the compiler.
    /// Use this for type equality checks and hash map keys.
    pub id: TypeKey,

    /// Name of the type, for diagnostics.
    pub type_identifier: &'static str,

    /// The type this one extends, if any. Field declarations of every ancestor
    /// apply to this type as well.
    pub parent: Option<&'static TypeDesc>,

    /// Fields that documents can set, in declaration order. Fields of the
    /// parent are not repeated here.
    pub fields: &'static [FieldDesc],

    /// Construction strategy declared alongside the type.
    pub builder: Option<Strategy>,

    /// Constructors.
    pub vtable: TypeVTable,
}

impl TypeDesc {
    /// Returns a descriptor with no fields, parent, builder or constructors.
    pub const fn opaque(id: TypeKey, type_identifier: &'static str) -> Self {
        Self {
            id,
            type_identifier,
            parent: None,
            fields: &[],
            builder: None,
            vtable: TypeVTable::EMPTY,
        }
    }

    /// Iterates over this descriptor followed by each of its ancestors,
    /// nearest first.
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static TypeDesc> {
        core::iter::successors(Some(self), |desc| desc.parent)
    }

    /// Returns true if `self` is `other` or one of its descendants.
    pub fn is_subtype_of(&'static self, other: &TypeDesc) -> bool {
        self.ancestry().any(|desc| desc == other)
    }

    /// Looks a field up by name, among this descriptor's own fields only.
    pub fn field(&self, name: &str) -> Option<&'static FieldDesc> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TypeDesc");
        s.field("type_identifier", &self.type_identifier);
        if let Some(parent) = self.parent {
            s.field("parent", &parent.type_identifier);
        }
        s.field(
            "fields",
            &self.fields.iter().map(|f| f.name).collect::<Vec<_>>(),
        );
        s.finish_non_exhaustive()
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_identifier)
    }
}
