use remodel_build::{BuildConfig, Registry};
use remodel_core::{BuildErrorKind, Mode, model};
use remodel_testhelpers::{IPanic, test};
use serde_json::json;

model! {
    #[derive(Debug, Default, PartialEq)]
    struct Duck {
        quack: Option<String>,
    }
}

model! {
    #[derive(Debug, Default)]
    struct Pond {
        #[build] duck: Option<Duck>,
    }
}

model! {
    #[derive(Debug, Default)]
    struct Nest {
        #[build] eggs: Option<Vec<String>>,
    }
}

fn strict() -> Registry {
    let mut registry = Registry::with_config(BuildConfig::strict());
    registry.declare::<Pond>().declare::<Nest>();
    registry
}

fn permissive() -> Registry {
    let mut registry = Registry::new();
    registry.declare::<Pond>().declare::<Nest>();
    registry
}

#[test]
fn registries_are_permissive_by_default() {
    assert_eq!(Registry::new().config().mode, Mode::Permissive);
    assert_eq!(
        BuildConfig::permissive().with_mode(Mode::Strict),
        BuildConfig::strict()
    );
}

#[test]
fn unknown_keys_are_skipped_when_permissive() -> Result<(), IPanic> {
    let duck = permissive()
        .build::<Duck>(&json!({ "quack": "hi", "waddle": true }))?
        .unwrap();
    assert_eq!(
        duck,
        Duck {
            quack: Some("hi".to_string())
        }
    );
    Ok(())
}

#[test]
fn unknown_keys_are_rejected_when_strict() {
    let err = strict()
        .build::<Duck>(&json!({ "quack": "hi", "waddle": true }))
        .unwrap_err();
    insta::assert_snapshot!(err, @"unknown field `waddle` for Duck");
}

#[test]
fn nested_strict_errors_carry_the_path() {
    let err = strict()
        .build::<Pond>(&json!({ "duck": { "waddle": true } }))
        .unwrap_err();
    insta::assert_snapshot!(err, @"at .duck: unknown field `waddle` for Duck");
}

#[test]
fn non_mappings_give_a_default_instance_when_permissive() -> Result<(), IPanic> {
    let duck = permissive().build::<Duck>(&json!(3))?.unwrap();
    assert_eq!(duck, Duck::default());
    Ok(())
}

#[test]
fn non_mappings_are_rejected_when_strict() {
    let err = strict().build::<Duck>(&json!(3)).unwrap_err();
    assert!(matches!(
        err.kind,
        BuildErrorKind::ExpectedMapping {
            type_identifier: "Duck",
            got: "a number",
        }
    ));
    insta::assert_snapshot!(err, @"expected a mapping to build Duck, got a number");
}

#[test]
fn unresolved_field_types_copy_verbatim_when_permissive() -> Result<(), IPanic> {
    let nest = permissive()
        .build::<Nest>(&json!({ "eggs": ["speckled", "blue"] }))?
        .unwrap();
    assert_eq!(
        nest.eggs,
        Some(vec!["speckled".to_string(), "blue".to_string()])
    );
    Ok(())
}

#[test]
fn unresolved_field_types_are_rejected_when_strict() {
    let err = strict()
        .build::<Nest>(&json!({ "eggs": ["speckled"] }))
        .unwrap_err();
    insta::assert_snapshot!(
        err,
        @"at .eggs: field `eggs` of Nest is annotated but its type is not a model"
    );
}

#[test]
fn null_passes_through_in_both_modes() -> Result<(), IPanic> {
    for registry in [strict(), permissive()] {
        let pond = registry.build::<Pond>(&json!({ "duck": null }))?.unwrap();
        assert!(pond.duck.is_none());
        assert!(registry.build::<Pond>(&json!(null))?.is_none());
    }
    Ok(())
}
