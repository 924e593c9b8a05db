//! The entry points.

use remodel_core::{
    BuildError, Built, FieldDecl, Instance, Materialize, Mode, Model, PathSegment,
    TypeDesc, Value,
};

use crate::strategy::construct;
use crate::{Registry, trace};

impl Registry {
    /// Builds `document` into an instance of `ty`.
    ///
    /// Absence and `null` pass through unchanged, as [`Built::Absent`] and
    /// [`Built::Null`], without allocating anything. Otherwise the document is
    /// handed to the strategy registered for `ty` (the property-copy strategy
    /// if none is), and any error it raises is returned as is.
    pub fn build_model(
        &self,
        document: Option<&Value>,
        ty: &'static TypeDesc,
    ) -> Result<Built, BuildError> {
        let document = match document {
            None => return Ok(Built::Absent),
            Some(Value::Null) => return Ok(Built::Null),
            Some(document) => document,
        };

        let strategy = self.strategy_for(ty);
        trace!("building {ty} with the {} strategy", strategy.name());
        construct(strategy, self, document, ty).map(Built::Instance)
    }

    /// Builds every element of `items` into an instance of `ty`, preserving
    /// order and length. Null elements stay null.
    pub fn build_array(
        &self,
        items: &[Value],
        ty: &'static TypeDesc,
    ) -> Result<Vec<Built>, BuildError> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.build_model(Some(item), ty)
                    .map_err(|e| e.with_path(PathSegment::Index(index)))
            })
            .collect()
    }

    /// Builds `document` into a `T`. `null` gives `None`.
    ///
    /// The annotations on `T` and on the models it refers to apply whether or
    /// not they were declared. Registrations made on the registry win.
    pub fn build<T: Model>(&self, document: &Value) -> Result<Option<T>, BuildError> {
        into_option(self.build_model(Some(document), T::DESC)?)
    }

    /// Builds every element of `items` into a `T`. Null elements give `None`.
    pub fn build_vec<T: Model>(&self, items: &[Value]) -> Result<Vec<Option<T>>, BuildError> {
        self.build_array(items, T::DESC)?
            .into_iter()
            .map(into_option)
            .collect()
    }
}

fn into_option<T: Model>(built: Built) -> Result<Option<T>, BuildError> {
    if built.is_nothing() {
        Ok(None)
    } else {
        built.into_model().map(Some)
    }
}

impl Materialize for Registry {
    fn build_model(
        &self,
        document: Option<&Value>,
        ty: &'static TypeDesc,
    ) -> Result<Built, BuildError> {
        Registry::build_model(self, document, ty)
    }

    fn build_array(
        &self,
        items: &[Value],
        ty: &'static TypeDesc,
    ) -> Result<Vec<Built>, BuildError> {
        Registry::build_array(self, items, ty)
    }

    fn lookup_field_type(&self, instance: &dyn Instance, field: &str) -> Option<FieldDecl> {
        Registry::lookup_field_type(self, instance, field)
    }

    fn mode(&self) -> Mode {
        self.config().mode
    }
}
