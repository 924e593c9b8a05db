//! The construction strategies.

use remodel_core::{
    BuildError, BuildErrorKind, Built, FieldDecl, Instance, Materialize, PathSegment, Strategy,
    TypeDesc, Value,
};

use crate::{debug, trace};

/// Runs `strategy` to build `document` into `ty`.
pub(crate) fn construct(
    strategy: Strategy,
    materializer: &dyn Materialize,
    document: &Value,
    ty: &'static TypeDesc,
) -> Result<Box<dyn Instance>, BuildError> {
    match strategy {
        Strategy::Properties => with_properties(materializer, document, ty),
        Strategy::Constructor => with_constructor(materializer, document, ty),
        Strategy::Custom(build) => build(materializer, document, ty),
    }
}

/// The property-copy strategy.
///
/// Allocates `ty` through its zero-argument constructor, then assigns every
/// key of the document, in document order. Keys with a declared element type
/// are rebuilt (element by element for sequences), the others are copied
/// verbatim. Fields missing from the document keep their default values.
pub fn with_properties(
    materializer: &dyn Materialize,
    document: &Value,
    ty: &'static TypeDesc,
) -> Result<Box<dyn Instance>, BuildError> {
    let default = ty
        .vtable
        .default
        .ok_or(BuildErrorKind::NoDefaultConstructor {
            type_identifier: ty.type_identifier,
        })?;
    let mut instance = default();

    let Some(properties) = document.as_object() else {
        if materializer.mode().is_strict() {
            return Err(BuildErrorKind::ExpectedMapping {
                type_identifier: ty.type_identifier,
                got: kind_of(document),
            }
            .into());
        }
        debug!("{ty} from {}: nothing to copy", kind_of(document));
        return Ok(instance);
    };

    for (key, value) in properties {
        let built = build_property(materializer, instance.as_ref(), key, value)
            .map_err(|e| e.with_path(PathSegment::Field(key.clone())))?;
        let assigned = instance
            .set_field(key, built)
            .map_err(|e| e.with_path(PathSegment::Field(key.clone())))?;
        if !assigned {
            if materializer.mode().is_strict() {
                return Err(BuildErrorKind::UnknownField {
                    type_identifier: ty.type_identifier,
                    field: key.clone(),
                }
                .into());
            }
            trace!("{ty} has no field `{key}`, skipping");
        }
    }
    Ok(instance)
}

/// Builds the value of one document key, as the field it lands in asks for.
fn build_property(
    materializer: &dyn Materialize,
    instance: &dyn Instance,
    key: &str,
    value: &Value,
) -> Result<Built, BuildError> {
    match materializer.lookup_field_type(instance, key) {
        None => {
            trace!("{}.{key}: copied verbatim", instance.desc());
            Ok(Built::Raw(value.clone()))
        }
        Some(FieldDecl::Unresolved) if materializer.mode().is_strict() => {
            Err(BuildErrorKind::UnresolvedFieldType {
                type_identifier: instance.desc().type_identifier,
                field: key.to_string(),
            }
            .into())
        }
        Some(FieldDecl::Unresolved) => {
            debug!("{}.{key}: element type unresolved, copied verbatim", instance.desc());
            Ok(Built::Raw(value.clone()))
        }
        Some(FieldDecl::Resolved(element)) => match value {
            Value::Array(items) => materializer.build_array(items, element).map(Built::Sequence),
            other => materializer.build_model(Some(other), element),
        },
    }
}

/// The constructor-passthrough strategy.
///
/// Hands the raw document to the type's document constructor, which is
/// responsible for interpreting it.
pub fn with_constructor(
    _materializer: &dyn Materialize,
    document: &Value,
    ty: &'static TypeDesc,
) -> Result<Box<dyn Instance>, BuildError> {
    let from_document = ty
        .vtable
        .from_document
        .ok_or(BuildErrorKind::NoDocumentConstructor {
            type_identifier: ty.type_identifier,
        })?;
    from_document(document)
}

/// Describes a document node, for error messages.
pub(crate) fn kind_of(document: &Value) -> &'static str {
    match document {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
