//! Kind defaults loaded from TOML.

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::prelude::*;
use std::sync::Arc;

const DEFAULTS: &str = r#"
[string]
nils = "allow"
squish = true

[integer]
delimiter = "_"
invalid = "discard"

[date]
min = "2000-01-01"
"#;

fn context() -> Arc<BuildContext> {
    let defaults = KindDefaults::from_toml_str(DEFAULTS).unwrap();
    Arc::new(BuildContext::new(defaults, ModelRegistry::new()))
}

#[test]
fn defaults_apply_to_every_filter_of_the_kind() {
    let schema = Schema::build_in(context(), |s| {
        s.string("title", |_| {})
            .string("subtitle", |_| {})
            .integer("count", |_| {})
            .date("since", |_| {});
    })
    .unwrap();

    let outcome = schema
        .feed([json!({
            "title": "  a   b  ",
            "subtitle": null,
            "count": "1_000",
            "since": "1999-12-31"
        })])
        .unwrap();

    assert_eq!(outcome.inputs()["title"], Value::from("a b"));
    assert_eq!(outcome.inputs()["subtitle"], Value::Null);
    assert_eq!(outcome.inputs()["count"], Value::Integer(1000));
    assert_eq!(
        outcome.errors().unwrap().codes().get("since").and_then(ErrorShape::leaf),
        Some(&ErrorCode::BEFORE_BOUND)
    );
}

#[test]
fn instance_options_override_defaults() {
    let schema = Schema::build_in(context(), |s| {
        s.string("title", |o| o.common.nils = Policy::Deny)
            .integer("count", |o| o.common.invalid = Policy::Deny);
    })
    .unwrap();

    let outcome = schema
        .feed([json!({"title": null, "count": "many"})])
        .unwrap();
    let codes = outcome.errors().unwrap().codes();
    assert_eq!(codes.get("title").and_then(ErrorShape::leaf), Some(&ErrorCode::NILS));
    assert_eq!(
        codes.get("count").and_then(ErrorShape::leaf),
        Some(&ErrorCode::NOT_AN_INTEGER)
    );
}

#[test]
fn loading_defaults_never_touches_the_standard_registry() {
    let _ = context();
    assert_eq!(KindDefaults::standard().string.common.nils, Policy::Deny);
    assert!(KindDefaults::standard().string.strip);
}

#[test]
fn unknown_kind_is_rejected() {
    let err = KindDefaults::from_toml_str("[symbol]\nstrip = true\n").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKind(kind) if kind == "symbol"));
}

#[test]
fn unknown_option_is_rejected() {
    let err = KindDefaults::from_toml_str("[integer]\nmaximum = 3\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Option(sift::OptionError::Unknown { kind: "integer", .. })
    ));
}

#[test]
fn sections_must_be_tables() {
    let err = KindDefaults::from_toml_str("string = 3\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSection(section) if section == "string"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = KindDefaults::from_toml_str("[string\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn option_values_are_type_checked() {
    let err = KindDefaults::from_toml_str("[string]\nmax_length = \"long\"\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Option(sift::OptionError::InvalidValue { kind: "string", .. })
    ));
}
