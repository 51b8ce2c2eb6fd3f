//! Deriving schemas from other schemas.

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::prelude::*;
use std::sync::Arc;

fn base() -> Schema {
    Schema::build(|s| {
        s.string("name", |_| {})
            .string("email", |o| o.common.missing = Policy::Allow);
    })
    .unwrap()
}

#[test]
fn last_declaration_wins() {
    let schema = SchemaBuilder::new(BuildContext::standard())
        .fields(|s| {
            s.string("a", |_| {});
        })
        .fields(|s| {
            s.integer("a", |_| {});
        })
        .build()
        .unwrap();

    assert_eq!(schema.len(), 1);
    assert_eq!(schema.get("a").map(|f| f.kind()), Some(FilterKind::Integer));
}

#[test]
fn derived_schema_appends_and_overrides() {
    let parent = base();
    let child = parent
        .extend(|s| {
            s.string("email", |o| o.common.missing = Policy::Deny)
                .integer("age", |_| {});
        })
        .unwrap();

    assert_eq!(child.keys().collect::<Vec<_>>(), vec!["name", "email", "age"]);

    let input = json!({"name": "Ada"});
    assert!(parent.feed([input.clone()]).unwrap().is_success());

    let outcome = child.feed([input]).unwrap();
    let errors = outcome.errors().unwrap();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["email", "age"]);
}

#[test]
fn overriding_replaces_constraints_instead_of_merging() {
    let parent = Schema::build(|s| {
        s.string("code", |o| o.max_length = Some(3));
    })
    .unwrap();
    let child = parent
        .extend(|s| {
            s.string("code", |o| o.min_length = Some(5));
        })
        .unwrap();

    assert!(child.feed([json!({"code": "ABCDEF"})]).unwrap().is_success());
    assert!(!parent.feed([json!({"code": "ABCDEF"})]).unwrap().is_success());
}

#[test]
fn untouched_children_are_shared() {
    let parent = base();
    let child = parent
        .derive()
        .fields(|s| {
            s.boolean("admin", |_| {});
        })
        .build()
        .unwrap();

    assert!(Arc::ptr_eq(
        parent.get("name").unwrap(),
        child.get("name").unwrap()
    ));
    assert!(parent.get("admin").is_none());
    assert!(Arc::ptr_eq(parent.context(), child.context()));
}

#[test]
fn derived_build_errors_surface() {
    let err = base()
        .extend(|s| {
            s.string("slug", |o| o.pattern = Some("[".into()));
        })
        .unwrap_err();
    assert!(matches!(err, BuildError::InvalidPattern { pattern, .. } if pattern == "["));
}
