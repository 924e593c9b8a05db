use serde_json::Value;

use crate::{BuildError, BuildErrorKind, Built, FieldType, FromBuilt, TypeDesc};

impl FieldType for Value {
    fn element() -> Option<&'static TypeDesc> {
        None
    }
}

impl FromBuilt for Value {
    fn from_built(built: Built) -> Result<Self, BuildError> {
        match built {
            Built::Raw(value) => Ok(value),
            Built::Null | Built::Absent => Ok(Value::Null),
            Built::Sequence(items) => items
                .into_iter()
                .map(Value::from_built)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Built::Instance(instance) => Err(BuildErrorKind::UnexpectedKind {
                expected: "a document value",
                got: instance.desc().type_identifier,
            }
            .into()),
        }
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn element() -> Option<&'static TypeDesc> {
                    None
                }
            }

            impl FromBuilt for $ty {
                fn from_built(built: Built) -> Result<Self, BuildError> {
                    match built {
                        Built::Raw(value) => serde_json::from_value(value).map_err(|source| {
                            BuildErrorKind::InvalidScalar {
                                expected: stringify!($ty),
                                source,
                            }
                            .into()
                        }),
                        Built::Null => serde_json::from_value(Value::Null).map_err(|source| {
                            BuildErrorKind::InvalidScalar {
                                expected: stringify!($ty),
                                source,
                            }
                            .into()
                        }),
                        other => Err(BuildErrorKind::UnexpectedKind {
                            expected: stringify!($ty),
                            got: other.kind(),
                        }
                        .into()),
                    }
                }
            }
        )*
    };
}

impl_scalar!(
    String, bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
);
