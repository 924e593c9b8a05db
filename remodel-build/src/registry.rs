use std::collections::{HashMap, HashSet};

use remodel_core::{Date, FieldDecl, Model, Strategy, TypeDesc, TypeKey};

use crate::{BuildConfig, debug, trace};

/// The type metadata store.
///
/// Maps a type to its construction strategy, and a (type, field) pair to the
/// element type values of that field are rebuilt into. Populate it once at
/// start-up with [`Registry::declare`] or the `register_*` methods, then build
/// through `&Registry` as often as needed.
///
/// A fresh registry already declares [`Date`], bound to
/// [`Strategy::Constructor`].
#[derive(Clone, Debug)]
pub struct Registry {
    strategies: HashMap<TypeKey, Strategy>,
    pub(crate) fields: HashMap<TypeKey, HashMap<&'static str, FieldDecl>>,
    declared: HashSet<TypeKey>,
    config: BuildConfig,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A permissive registry with the built-in types declared.
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    /// A registry with the built-in types declared.
    pub fn with_config(config: BuildConfig) -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
            fields: HashMap::new(),
            declared: HashSet::new(),
            config,
        };
        registry.declare::<Date>();
        registry
    }

    /// The settings this registry builds with.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Registers the construction strategy for `ty`, replacing any previous one.
    pub fn register_strategy(&mut self, ty: &'static TypeDesc, strategy: Strategy) -> &mut Self {
        trace!("{ty}: {} strategy", strategy.name());
        self.strategies.insert(ty.id, strategy);
        self
    }

    /// The strategy registered for exactly `ty`, if any.
    pub fn lookup_strategy(&self, ty: &TypeDesc) -> Option<Strategy> {
        self.strategies.get(&ty.id).copied()
    }

    /// The strategy `ty` is built with: the registered one, then the one
    /// its descriptor declares, then [`Strategy::Properties`].
    pub fn strategy_for(&self, ty: &TypeDesc) -> Strategy {
        self.lookup_strategy(ty)
            .or(ty.builder)
            .unwrap_or(Strategy::Properties)
    }

    /// Declares that values of `ty.field` are rebuilt into `element`,
    /// replacing any previous declaration for that exact field.
    pub fn register_field_type(
        &mut self,
        ty: &'static TypeDesc,
        field: &'static str,
        element: &'static TypeDesc,
    ) -> &mut Self {
        self.register_field_decl(ty, field, FieldDecl::Resolved(element))
    }

    /// Records a field declaration, replacing any previous one for that
    /// exact field.
    pub fn register_field_decl(
        &mut self,
        ty: &'static TypeDesc,
        field: &'static str,
        decl: FieldDecl,
    ) -> &mut Self {
        trace!("{ty}.{field}: {decl:?}");
        self.fields.entry(ty.id).or_default().insert(field, decl);
        self
    }

    /// Runs the declarations of `T`. See [`Registry::declare_type`].
    pub fn declare<T: Model>(&mut self) -> &mut Self {
        self.declare_type(T::DESC)
    }

    /// Runs the declarations attached to a descriptor: its builder, the
    /// `#[build]` annotations of its fields, and, recursively, those of its
    /// ancestors and of every element type it refers to.
    ///
    /// Each type is declared once; later calls are no-ops, so explicit
    /// registrations made after declaring a type stick.
    pub fn declare_type(&mut self, ty: &'static TypeDesc) -> &mut Self {
        if !self.declared.insert(ty.id) {
            return self;
        }
        debug!("declaring {ty}");

        if let Some(parent) = ty.parent {
            self.declare_type(parent);
        }
        if let Some(strategy) = ty.builder {
            self.register_strategy(ty, strategy);
        }

        for field in ty.fields {
            if field.build.is_none() {
                continue;
            }
            match field.element() {
                Some(element) => {
                    self.register_field_type(ty, field.name, element);
                    self.declare_type(element);
                }
                None => {
                    self.register_field_decl(ty, field.name, FieldDecl::Unresolved);
                }
            }
        }
        self
    }

    /// Returns true once `ty` has been declared.
    pub fn is_declared(&self, ty: &TypeDesc) -> bool {
        self.declared.contains(&ty.id)
    }
}

#[cfg(test)]
mod tests {
    use remodel_core::{BuildAttr, FieldDesc, TypeVTable};

    use super::*;

    struct Song;
    struct Album;
    struct Pressing;

    static SONG: TypeDesc = TypeDesc::opaque(TypeKey::of::<Song>(), "Song");

    fn song() -> &'static TypeDesc {
        &SONG
    }

    static PRESSING: TypeDesc = TypeDesc {
        builder: Some(Strategy::Constructor),
        ..TypeDesc::opaque(TypeKey::of::<Pressing>(), "Pressing")
    };

    static ALBUM: TypeDesc = TypeDesc {
        fields: &[
            FieldDesc {
                name: "tracks",
                shape: || None,
                build: Some(BuildAttr::Explicit(song)),
            },
            FieldDesc {
                name: "title",
                shape: || None,
                build: None,
            },
            FieldDesc {
                name: "released",
                shape: || None,
                build: Some(BuildAttr::Inferred),
            },
        ],
        builder: Some(Strategy::Properties),
        vtable: TypeVTable::EMPTY,
        ..TypeDesc::opaque(TypeKey::of::<Album>(), "Album")
    };

    #[test]
    fn dates_are_preregistered() {
        let registry = Registry::new();
        assert!(registry.is_declared(Date::DESC));
        assert!(matches!(
            registry.lookup_strategy(Date::DESC),
            Some(Strategy::Constructor)
        ));
    }

    #[test]
    fn declared_builder_applies_without_declaring() {
        let mut registry = Registry::new();
        assert!(!registry.is_declared(&PRESSING));
        assert!(registry.lookup_strategy(&PRESSING).is_none());
        assert!(matches!(registry.strategy_for(&PRESSING), Strategy::Constructor));

        registry.register_strategy(&PRESSING, Strategy::Properties);
        assert!(matches!(registry.strategy_for(&PRESSING), Strategy::Properties));
    }

    #[test]
    fn last_strategy_wins() {
        let mut registry = Registry::new();
        assert!(registry.lookup_strategy(&SONG).is_none());
        assert!(matches!(registry.strategy_for(&SONG), Strategy::Properties));

        registry.register_strategy(song(), Strategy::Constructor);
        registry.register_strategy(song(), Strategy::Properties);
        assert!(matches!(
            registry.lookup_strategy(&SONG),
            Some(Strategy::Properties)
        ));
    }

    #[test]
    fn declaring_reads_annotations() {
        let mut registry = Registry::new();
        registry.declare_type(&ALBUM);

        let album_fields = &registry.fields[&ALBUM.id];
        assert_eq!(album_fields.get("tracks"), Some(&FieldDecl::Resolved(&SONG)));
        assert_eq!(album_fields.get("title"), None);
        assert_eq!(album_fields.get("released"), Some(&FieldDecl::Unresolved));
        assert!(registry.is_declared(&SONG));
        assert!(matches!(
            registry.lookup_strategy(&ALBUM),
            Some(Strategy::Properties)
        ));
    }

    #[test]
    fn declaring_twice_keeps_explicit_registrations() {
        let mut registry = Registry::new();
        registry.declare_type(&ALBUM);
        registry.register_field_type(&ALBUM, "tracks", Date::DESC);
        registry.declare_type(&ALBUM);

        assert_eq!(
            registry.fields[&ALBUM.id].get("tracks"),
            Some(&FieldDecl::Resolved(Date::DESC))
        );
    }
}
