//! A process-wide [`Registry`].
//!
//! Prefer passing a [`Registry`] around. This module exists for code that
//! declares its models at start-up and builds from anywhere afterwards.
//!
//! Construction runs on a snapshot of the registry and holds no lock, so a
//! custom strategy may call back into this module, registrations included.
//! Registrations made while a build is running apply to later builds only.
//! A poisoned lock is recovered, since the registry behind it is swapped
//! whole and never left half-updated.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use remodel_core::{BuildError, Built, Model, Strategy, TypeDesc, Value};

use crate::Registry;

static REGISTRY: LazyLock<RwLock<Arc<Registry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Registry::new())));

/// The current state of the process-wide registry.
pub fn snapshot() -> Arc<Registry> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Runs `f` on the process-wide registry. Snapshots taken earlier are left
/// untouched.
pub fn update<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    f(Arc::make_mut(&mut registry))
}

/// Declares `T` in the process-wide registry.
pub fn declare<T: Model>() {
    update(|registry| {
        registry.declare::<T>();
    });
}

/// Registers a strategy in the process-wide registry.
pub fn register_strategy(ty: &'static TypeDesc, strategy: Strategy) {
    update(|registry| {
        registry.register_strategy(ty, strategy);
    });
}

/// Registers a field type in the process-wide registry.
pub fn register_field_type(
    ty: &'static TypeDesc,
    field: &'static str,
    element: &'static TypeDesc,
) {
    update(|registry| {
        registry.register_field_type(ty, field, element);
    });
}

/// [`Registry::build_model`] on the process-wide registry.
pub fn build_model(document: Option<&Value>, ty: &'static TypeDesc) -> Result<Built, BuildError> {
    snapshot().build_model(document, ty)
}

/// [`Registry::build_array`] on the process-wide registry.
pub fn build_array(items: &[Value], ty: &'static TypeDesc) -> Result<Vec<Built>, BuildError> {
    snapshot().build_array(items, ty)
}

/// [`Registry::build`] on the process-wide registry, declaring `T` first if
/// it has not been declared yet.
pub fn build<T: Model>(document: &Value) -> Result<Option<T>, BuildError> {
    if !snapshot().is_declared(T::DESC) {
        declare::<T>();
    }
    snapshot().build(document)
}
