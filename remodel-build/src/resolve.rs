//! Field-type resolution.

use remodel_core::{FieldDecl, Instance, TypeDesc};

use crate::Registry;

impl Registry {
    /// Resolves the element type of `field` for an instance.
    ///
    /// The lookup goes through the instance's runtime type, so a subtype
    /// instance sees the field declarations of all of its ancestors.
    pub fn lookup_field_type(&self, instance: &dyn Instance, field: &str) -> Option<FieldDecl> {
        self.lookup_field_type_of(instance.desc(), field)
    }

    /// Resolves the element type of `field` for `ty` or its nearest ancestor
    /// declaring it.
    ///
    /// For each type on the way up, a registered declaration wins over the
    /// field's own annotation, so undeclared types still honour their
    /// `#[build]` fields.
    pub fn lookup_field_type_of(&self, ty: &'static TypeDesc, field: &str) -> Option<FieldDecl> {
        ty.ancestry().find_map(|desc| {
            self.fields
                .get(&desc.id)
                .and_then(|fields| fields.get(field).copied())
                .or_else(|| annotated(desc, field))
        })
    }
}

/// The declaration a descriptor's own annotation makes for `field`.
fn annotated(ty: &'static TypeDesc, field: &str) -> Option<FieldDecl> {
    let desc = ty.field(field)?;
    desc.build?;
    Some(match desc.element() {
        Some(element) => FieldDecl::Resolved(element),
        None => FieldDecl::Unresolved,
    })
}
