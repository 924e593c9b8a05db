use remodel_build::{Registry, with_properties};
use remodel_core::{
    BuildError, BuildErrorKind, Date, Instance, Materialize, Model, PathSegment, Strategy,
    TypeDesc, Value, model,
};
use remodel_testhelpers::{IPanic, test};
use serde_json::json;

model! {
    #[derive(Debug, Default, PartialEq)]
    struct Celsius {
        degrees: Option<f64>,
    }
}

model! {
    #[derive(Debug, Default, PartialEq)]
    struct Thermostat {
        room: Option<String>,
        #[build] target: Option<Celsius>,
    }
}

model! {
    #[derive(Debug, Default, PartialEq)]
    struct Duck {
        quack: Option<String>,
    }
}

model! {
    #[derive(Debug, Default)]
    struct Flock {
        #[build(Duck)] ducks: Vec<Duck>,
    }
}

model! {
    #[derive(Debug, Default)]
    struct Diary {
        entries: Vec<Date>,
    }
}

model! {
    #[derive(Debug, Default, PartialEq)]
    struct TreeNode {
        label: Option<String>,
        #[build] children: Vec<TreeNode>,
    }
}

/// Numbers are read as Fahrenheit, anything else is copied property by
/// property. Strings are rejected.
fn from_fahrenheit(
    materializer: &dyn Materialize,
    document: &Value,
    ty: &'static TypeDesc,
) -> Result<Box<dyn Instance>, BuildError> {
    match document {
        Value::Number(n) => Ok(Box::new(Celsius {
            degrees: n.as_f64().map(|f| (f - 32.0) * 5.0 / 9.0),
        })),
        Value::String(s) => Err(BuildError::custom(format!(
            "cannot read {s:?} as a temperature"
        ))),
        _ => with_properties(materializer, document, ty),
    }
}

fn thermostats() -> Registry {
    let mut registry = Registry::new();
    registry
        .declare::<Thermostat>()
        .register_strategy(Celsius::DESC, Strategy::Custom(from_fahrenheit));
    registry
}

#[test]
fn custom_strategy_decides_how_to_build() -> Result<(), IPanic> {
    let registry = thermostats();

    assert_eq!(
        registry.build::<Celsius>(&json!(212))?,
        Some(Celsius {
            degrees: Some(100.0)
        })
    );
    assert_eq!(
        registry.build::<Celsius>(&json!({ "degrees": 21.5 }))?,
        Some(Celsius {
            degrees: Some(21.5)
        })
    );
    Ok(())
}

#[test]
fn custom_strategy_applies_to_nested_fields() -> Result<(), IPanic> {
    let registry = thermostats();

    let thermostat = registry
        .build::<Thermostat>(&json!({ "room": "den", "target": 32 }))?
        .unwrap();
    assert_eq!(thermostat.target, Some(Celsius { degrees: Some(0.0) }));
    Ok(())
}

#[test]
fn custom_strategy_errors_carry_the_field_path() {
    let registry = thermostats();

    let err = registry
        .build::<Thermostat>(&json!({ "target": "warm" }))
        .unwrap_err();
    assert!(matches!(err.kind, BuildErrorKind::Custom(_)));
    insta::assert_snapshot!(err, @r#"at .target: cannot read "warm" as a temperature"#);
}

#[test]
fn property_strategy_needs_a_default_constructor() {
    let mut registry = Registry::new();
    registry.register_strategy(Date::DESC, Strategy::Properties);

    let err = registry.build::<Date>(&json!("2015-04-23")).unwrap_err();
    insta::assert_snapshot!(err, @"Date has no zero-argument constructor");
}

#[test]
fn constructor_strategy_needs_a_document_constructor() {
    let mut registry = Registry::new();
    registry.register_strategy(Duck::DESC, Strategy::Constructor);

    let err = registry.build::<Duck>(&json!({ "quack": "hi" })).unwrap_err();
    insta::assert_snapshot!(err, @"Duck has no document constructor");
}

#[test]
fn scalar_errors_point_into_sequences() {
    let mut registry = Registry::new();
    registry.declare::<Flock>();

    let err = registry
        .build::<Flock>(&json!({
            "ducks": [{ "quack": "quack" }, { "quack": false }],
        }))
        .unwrap_err();
    assert!(matches!(
        err.kind,
        BuildErrorKind::InvalidScalar {
            expected: "String",
            ..
        }
    ));
    assert_eq!(
        err.path,
        vec![
            PathSegment::Field("ducks".to_string()),
            PathSegment::Index(1),
            PathSegment::Field("quack".to_string()),
        ]
    );
    assert_eq!(err.path_string(), ".ducks[1].quack");
}

#[test]
fn unannotated_fields_are_not_rebuilt() {
    let registry = Registry::new();

    let err = registry
        .build::<Diary>(&json!({ "entries": ["2015-04-23"] }))
        .unwrap_err();
    insta::assert_snapshot!(err, @"at .entries[0]: expected Date, got a raw document value");
}

#[test]
fn registered_field_types_are_rebuilt() -> Result<(), IPanic> {
    let mut registry = Registry::new();
    registry.register_field_type(Diary::DESC, "entries", Date::DESC);

    let diary = registry
        .build::<Diary>(&json!({ "entries": ["2015-04-23", "2015-05-13"] }))?
        .unwrap();
    assert_eq!(
        diary.entries,
        vec![Date::parse("2015-04-23"), Date::parse("2015-05-13")]
    );
    Ok(())
}

#[test]
fn self_referential_models_build_to_any_depth() -> Result<(), IPanic> {
    let mut registry = Registry::new();
    registry.declare::<TreeNode>();

    let tree = registry
        .build::<TreeNode>(&json!({
            "label": "root",
            "children": [
                { "label": "leaf" },
                { "label": "branch", "children": [{ "label": "twig" }] },
            ],
        }))?
        .unwrap();

    let leaf = |label: &str| TreeNode {
        label: Some(label.to_string()),
        children: vec![],
    };
    assert_eq!(
        tree,
        TreeNode {
            label: Some("root".to_string()),
            children: vec![
                leaf("leaf"),
                TreeNode {
                    label: Some("branch".to_string()),
                    children: vec![leaf("twig")],
                },
            ],
        }
    );
    Ok(())
}

#[test]
fn declaring_is_idempotent() {
    let mut registry = Registry::new();
    registry.declare::<TreeNode>().declare::<TreeNode>();
    assert!(registry.is_declared(TreeNode::DESC));
    assert_eq!(
        registry.lookup_field_type_of(TreeNode::DESC, "children"),
        Some(remodel_core::FieldDecl::Resolved(TreeNode::DESC))
    );
}
