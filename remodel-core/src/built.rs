use serde_json::Value;

use crate::{BuildError, BuildErrorKind, Instance, Model};

/// The result of building a document node.
#[derive(Debug)]
pub enum Built {
    /// There was no document at all.
    Absent,

    /// The document was `null`.
    Null,

    /// The document, copied verbatim because no element type applied.
    Raw(Value),

    /// A constructed instance.
    Instance(Box<dyn Instance>),

    /// One built value per element of a document sequence.
    Sequence(Vec<Built>),
}

impl Built {
    /// Describes what kind of value this is, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Built::Absent => "nothing",
            Built::Null => "null",
            Built::Raw(_) => "a raw document value",
            Built::Instance(_) => "an instance",
            Built::Sequence(_) => "a sequence",
        }
    }

    /// Returns true for [`Built::Null`] and [`Built::Absent`].
    pub fn is_nothing(&self) -> bool {
        matches!(self, Built::Null | Built::Absent)
    }

    /// Returns the constructed instance, if this is one.
    pub fn as_instance(&self) -> Option<&dyn Instance> {
        match self {
            Built::Instance(instance) => Some(instance.as_ref()),
            _ => None,
        }
    }

    /// Extracts the constructed instance as a `T`.
    pub fn into_model<T: Model>(self) -> Result<T, BuildError> {
        match self {
            Built::Instance(instance) => instance.downcast::<T>().map_err(|other| {
                BuildErrorKind::WrongType {
                    expected: T::DESC.type_identifier,
                    got: other.desc().type_identifier,
                }
                .into()
            }),
            other => Err(BuildErrorKind::UnexpectedKind {
                expected: T::DESC.type_identifier,
                got: other.kind(),
            }
            .into()),
        }
    }
}

impl From<Value> for Built {
    fn from(value: Value) -> Self {
        Built::Raw(value)
    }
}

impl From<Box<dyn Instance>> for Built {
    fn from(instance: Box<dyn Instance>) -> Self {
        Built::Instance(instance)
    }
}

/// Conversion from a [`Built`] value into the Rust type of a model field.
pub trait FromBuilt: Sized {
    /// Performs the conversion.
    fn from_built(built: Built) -> Result<Self, BuildError>;
}
