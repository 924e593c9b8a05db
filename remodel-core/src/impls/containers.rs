use serde_json::Value;

use crate::{
    BuildError, BuildErrorKind, Built, FieldType, FromBuilt, Instance, PathSegment, TypeDesc,
};

impl<T: FieldType> FieldType for Option<T> {
    fn element() -> Option<&'static TypeDesc> {
        T::element()
    }
}

impl<T: FromBuilt> FromBuilt for Option<T> {
    fn from_built(built: Built) -> Result<Self, BuildError> {
        if built.is_nothing() {
            Ok(None)
        } else {
            T::from_built(built).map(Some)
        }
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn element() -> Option<&'static TypeDesc> {
        T::element()
    }
}

impl<T: FromBuilt> FromBuilt for Vec<T> {
    fn from_built(built: Built) -> Result<Self, BuildError> {
        let items: Vec<Built> = match built {
            Built::Sequence(items) => items,
            Built::Raw(Value::Array(items)) => items.into_iter().map(Built::Raw).collect(),
            other => {
                return Err(BuildErrorKind::UnexpectedKind {
                    expected: "a sequence",
                    got: other.kind(),
                }
                .into());
            }
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_built(item).map_err(|e| e.with_path(PathSegment::Index(index)))
            })
            .collect()
    }
}

// A field holding any instance has no static element type: annotate it with
// an explicit `#[build(T)]`.
impl FieldType for Box<dyn Instance> {
    fn element() -> Option<&'static TypeDesc> {
        None
    }
}

impl FromBuilt for Box<dyn Instance> {
    fn from_built(built: Built) -> Result<Self, BuildError> {
        match built {
            Built::Instance(instance) => Ok(instance),
            other => Err(BuildErrorKind::UnexpectedKind {
                expected: "an instance",
                got: other.kind(),
            }
            .into()),
        }
    }
}
