use serde_json::Value;

use super::TypeDesc;
use crate::{BuildError, Instance, Materialize};

/// A user-supplied construction function.
///
/// It receives the materializer so it can recurse into nested documents.
pub type CustomBuildFn =
    fn(&dyn Materialize, &Value, &'static TypeDesc) -> Result<Box<dyn Instance>, BuildError>;

/// How instances of a type are constructed from a document.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    /// Allocate through the zero-argument constructor, then copy every
    /// document key onto the instance, rebuilding annotated fields.
    Properties,

    /// Hand the raw document to the type's document constructor.
    Constructor,

    /// Call a user-supplied function.
    Custom(CustomBuildFn),
}

impl Strategy {
    /// Short name of the strategy, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Properties => "properties",
            Strategy::Constructor => "constructor",
            Strategy::Custom(_) => "custom",
        }
    }
}
