/// Declares a model struct along with its descriptor.
///
/// The struct is emitted as written (minus the `#[build]` and `#[rename]`
/// annotations) and gets implementations of [`Model`](crate::Model),
/// [`Instance`](crate::Instance), [`FieldType`](crate::FieldType) and
/// [`FromBuilt`](crate::FromBuilt). It must derive `Debug` and `Default`.
///
/// # Field annotations
///
/// - `#[build]` rebuilds the field's values into the model type named by the
///   field's own Rust type (`Option<_>` and `Vec<_>` are looked through).
/// - `#[build(T)]` rebuilds the field's values into `T`, whatever the field's
///   Rust type.
/// - Unannotated fields receive the document value verbatim.
/// - `#[rename = "key"]` reads the field from document key `key` instead of
///   the field's name.
///
/// Doc comments and other attributes stay on the field.
///
/// # Type options
///
/// - `struct Child: Parent as base` embeds a `Parent` in the field `base`.
///   Field declarations of `Parent` apply to `Child`, and document keys that
///   `Child` does not know are forwarded to `base`.
/// - `with constructor` declares the constructor strategy: the type must
///   implement [`FromDocument`](crate::FromDocument).
/// - `with properties` declares the property-copy strategy explicitly.
///
/// # Example
///
/// ```ignore
/// use remodel_core::{Date, Instance, model};
///
/// model! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Duck {
///         pub quack: Option<String>,
///     }
/// }
///
/// model! {
///     #[derive(Debug, Default)]
///     pub struct Pond {
///         #[build(Duck)] pub bird: Option<Box<dyn Instance>>,
///         /// When the pond was dug.
///         #[build]
///         #[rename = "dugOn"]
///         pub dug: Option<Date>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! model {
    (@parent) => {
        ::core::option::Option::None
    };
    (@parent $parent:ty) => {
        ::core::option::Option::Some(<$parent as $crate::Model>::DESC)
    };

    (@builder $name:ident) => {
        ::core::option::Option::None
    };
    (@builder $name:ident properties) => {
        ::core::option::Option::Some($crate::Strategy::Properties)
    };
    (@builder $name:ident constructor) => {
        ::core::option::Option::Some($crate::Strategy::Constructor)
    };

    (@from_document $name:ident) => {
        ::core::option::Option::None
    };
    (@from_document $name:ident properties) => {
        ::core::option::Option::None
    };
    (@from_document $name:ident constructor) => {
        ::core::option::Option::Some($crate::construct_instance::<$name>)
    };

    (@build) => {
        ::core::option::Option::None
    };
    (@build #[build] $(#$rest:tt)*) => {
        ::core::option::Option::Some($crate::BuildAttr::Inferred)
    };
    (@build #[build($elem:ty)] $(#$rest:tt)*) => {
        ::core::option::Option::Some($crate::BuildAttr::Explicit($crate::desc_of::<$elem>))
    };
    (@build #$other:tt $(#$rest:tt)*) => {
        $crate::model!(@build $(#$rest)*)
    };

    (@key $field:ident) => {
        ::core::stringify!($field)
    };
    (@key $field:ident #[rename = $key:literal] $(#$rest:tt)*) => {
        $key
    };
    (@key $field:ident #$other:tt $(#$rest:tt)*) => {
        $crate::model!(@key $field $(#$rest)*)
    };

    // Emits the struct once every field attribute has been sorted: `build`
    // and `rename` are consumed, everything else is kept on the field.
    (@struct [$($head:tt)*] [$($done:tt)*]) => {
        $($head)* {
            $($done)*
        }
    };
    (@struct $head:tt [$($done:tt)*] [] [$($field:tt)*] $($rest:tt)*) => {
        $crate::model! { @struct $head [$($done)* $($field)*,] $($rest)* }
    };
    (@struct $head:tt $done:tt [#[build $($args:tt)*] $($attrs:tt)*] $($rest:tt)*) => {
        $crate::model! { @struct $head $done [$($attrs)*] $($rest)* }
    };
    (@struct $head:tt $done:tt [#[rename = $key:literal] $($attrs:tt)*] $($rest:tt)*) => {
        $crate::model! { @struct $head $done [$($attrs)*] $($rest)* }
    };
    (@struct $head:tt [$($done:tt)*] [#$keep:tt $($attrs:tt)*] $($rest:tt)*) => {
        $crate::model! { @struct $head [$($done)* #$keep] [$($attrs)*] $($rest)* }
    };

    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident $(: $parent:ty as $base:ident)? $(with $builder:ident)? {
            $(
                $(#$fattr:tt)*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $crate::model! {
            @struct [$(#[$attr])* $vis struct $name] [$(pub $base: $parent,)?]
            $([$(#$fattr)*] [$fvis $field: $fty])*
        }

        impl $crate::Model for $name {
            const DESC: &'static $crate::TypeDesc = &const {
                $crate::TypeDesc {
                    id: $crate::TypeKey::of::<$name>(),
                    type_identifier: ::core::stringify!($name),
                    parent: $crate::model!(@parent $($parent)?),
                    fields: &[
                        $(
                            $crate::FieldDesc {
                                name: $crate::model!(@key $field $(#$fattr)*),
                                shape: <$fty as $crate::FieldType>::element,
                                build: $crate::model!(@build $(#$fattr)*),
                            },
                        )*
                    ],
                    builder: $crate::model!(@builder $name $($builder)?),
                    vtable: $crate::TypeVTable {
                        default: ::core::option::Option::Some($crate::default_instance::<$name>),
                        from_document: $crate::model!(@from_document $name $($builder)?),
                    },
                }
            };
        }

        impl $crate::Instance for $name {
            fn desc(&self) -> &'static $crate::TypeDesc {
                <Self as $crate::Model>::DESC
            }

            #[allow(unreachable_code, unused_variables)]
            fn set_field(
                &mut self,
                name: &str,
                value: $crate::Built,
            ) -> ::core::result::Result<bool, $crate::BuildError> {
                $(
                    if name == $crate::model!(@key $field $(#$fattr)*) {
                        self.$field = $crate::FromBuilt::from_built(value)?;
                        return ::core::result::Result::Ok(true);
                    }
                )*
                $(
                    return $crate::Instance::set_field(&mut self.$base, name, value);
                )?
                ::core::result::Result::Ok(false)
            }
        }

        impl $crate::FieldType for $name {
            fn element() -> ::core::option::Option<&'static $crate::TypeDesc> {
                ::core::option::Option::Some(<Self as $crate::Model>::DESC)
            }
        }

        impl $crate::FromBuilt for $name {
            fn from_built(
                built: $crate::Built,
            ) -> ::core::result::Result<Self, $crate::BuildError> {
                built.into_model::<Self>()
            }
        }
    };
}
