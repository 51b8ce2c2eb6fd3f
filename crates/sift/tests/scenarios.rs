//! End-to-end feeding scenarios.

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::prelude::*;
use std::sync::Arc;
use std::thread;

fn payment() -> Schema {
    Schema::build(|s| {
        s.string("name", |o| o.max_length = Some(10))
            .string("email", |_| {})
            .integer("amount", |o| o.common.missing = Policy::Discard);
    })
    .unwrap()
}

#[test]
fn valid_input_omits_discarded_missing_key() {
    let outcome = payment()
        .feed([json!({"name": "John", "email": "john@x.com"})])
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.errors(), None);
    assert_eq!(
        Value::Map(outcome.inputs().clone()),
        Value::from(json!({"name": "John", "email": "john@x.com"}))
    );
}

#[test]
fn too_long_name_is_the_only_error() {
    let outcome = payment()
        .feed([json!({"name": "JohnTooLong", "email": "x"})])
        .unwrap();

    assert!(!outcome.is_success());
    let errors = outcome.errors().unwrap();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["name"]);
    assert_eq!(
        errors.get("name").and_then(ErrorNode::as_atom).map(|a| &a.code),
        Some(&ErrorCode::TOO_LONG)
    );
    assert!(!outcome.inputs().contains_key("name"));
    assert_eq!(outcome.inputs()["email"], Value::from("x"));
}

#[test]
fn discarded_list_elements_produce_no_error() {
    let schema = Schema::build(|s| {
        s.list("values", |_| {}, |el| {
            el.integer(|o| o.common.invalid = Policy::Discard);
        });
    })
    .unwrap();

    let outcome = schema.feed([json!({"values": [1, "two", 3]})]).unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.inputs()["values"], Value::from(json!([1, 3])));
}

#[test]
fn error_indices_follow_output_positions() {
    let schema = Schema::build(|s| {
        s.list("values", |_| {}, |el| {
            el.integer(|o| {
                o.common.invalid = Policy::Discard;
                o.max = Some(10);
            });
        });
    })
    .unwrap();

    let outcome = schema.feed([json!({"values": [1, "two", 30]})]).unwrap();
    let codes = outcome.errors().unwrap().codes();
    let values = codes.get("values").unwrap();
    assert_eq!(values.at(1).and_then(ErrorShape::leaf), Some(&ErrorCode::OUT_OF_RANGE));
    assert_eq!(values.at(2), None);
}

#[test]
fn nested_errors_mirror_the_tree() {
    let schema = Schema::build(|s| {
        s.map(
            "address",
            |_| {},
            |a| {
                a.string("city", |_| {})
                    .string("zip", |o| o.pattern = Some(r"^\d{4}$".into()));
            },
        )
        .list("phones", |_| {}, |el| {
            el.map(
                |_| {},
                |p| {
                    p.string("number", |o| o.min_length = Some(5));
                },
            );
        });
    })
    .unwrap();

    let outcome = schema
        .feed([json!({
            "address": {"city": "", "zip": "12a"},
            "phones": [{"number": "55512"}, {"number": "1"}, {}]
        })])
        .unwrap();

    let codes = outcome.errors().unwrap().codes();
    let address = codes.get("address").unwrap();
    assert_eq!(address.get("city").and_then(ErrorShape::leaf), Some(&ErrorCode::EMPTY));
    assert_eq!(
        address.get("zip").and_then(ErrorShape::leaf),
        Some(&ErrorCode::PATTERN_MISMATCH)
    );

    let phones = codes.get("phones").unwrap();
    assert_eq!(phones.at(0), None);
    assert_eq!(
        phones.at(1).and_then(|p| p.get("number")).and_then(ErrorShape::leaf),
        Some(&ErrorCode::TOO_SHORT)
    );
    assert_eq!(
        phones.at(2).and_then(|p| p.get("number")).and_then(ErrorShape::leaf),
        Some(&ErrorCode::REQUIRED)
    );
}

#[test]
fn composite_type_mismatch_is_a_single_atom() {
    let schema = Schema::build(|s| {
        s.map("address", |_| {}, |a| {
            a.string("city", |_| {});
        })
        .list("tags", |_| {}, |el| {
            el.string(|_| {});
        });
    })
    .unwrap();

    let outcome = schema
        .feed([json!({"address": "Main St", "tags": 3})])
        .unwrap();
    let codes = outcome.errors().unwrap().codes();
    assert_eq!(
        codes.get("address").and_then(ErrorShape::leaf),
        Some(&ErrorCode::NOT_A_MAP)
    );
    assert_eq!(
        codes.get("tags").and_then(ErrorShape::leaf),
        Some(&ErrorCode::NOT_A_LIST)
    );
}

#[test]
fn coercions_across_kinds() {
    let schema = Schema::build(|s| {
        s.boolean("active", |_| {})
            .integer("count", |_| {})
            .float("ratio", |_| {})
            .decimal("price", |_| {})
            .date("born", |_| {})
            .time("seen", |_| {})
            .any("extra", |_| {});
    })
    .unwrap();

    let outcome = schema
        .feed([json!({
            "active": "TRUE",
            "count": "1,200",
            "ratio": "0.25",
            "price": 19.99,
            "born": "1990-04-01",
            "seen": "2024-05-06T07:08:09+02:00",
            "extra": {"anything": [1, 2]}
        })])
        .unwrap();

    assert!(outcome.is_success(), "{:?}", outcome.errors());
    let inputs = outcome.inputs();
    assert_eq!(inputs["active"], Value::Boolean(true));
    assert_eq!(inputs["count"], Value::Integer(1200));
    assert_eq!(inputs["ratio"], Value::Float(0.25));
    assert_eq!(inputs["price"].as_decimal().map(|d| d.to_string()), Some("19.99".into()));
    assert_eq!(
        inputs["born"].as_date(),
        chrono::NaiveDate::from_ymd_opt(1990, 4, 1)
    );
    assert_eq!(
        inputs["seen"].as_time().map(|t| t.to_rfc3339()),
        Some("2024-05-06T07:08:09+02:00".into())
    );
    assert_eq!(inputs["extra"], Value::from(json!({"anything": [1, 2]})));
}

#[test]
fn strict_mode_skips_coercion() {
    let schema = Schema::build(|s| {
        s.integer("n", |o| o.common.strict = true);
    })
    .unwrap();

    assert!(schema.feed([json!({"n": 4})]).unwrap().is_success());
    let outcome = schema.feed([json!({"n": "4"})]).unwrap();
    assert_eq!(
        outcome.errors().unwrap().codes().get("n").and_then(ErrorShape::leaf),
        Some(&ErrorCode::NOT_AN_INTEGER)
    );
}

#[test]
fn into_result_raises_validation_failed() {
    let err = payment()
        .feed([json!({"email": "a@b.c"})])
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(err.messages, vec!["Name is required".to_string()]);
    assert!(err.to_string().contains("Name is required"));
}

#[test]
fn built_trees_are_shared_across_threads() {
    let schema = Arc::new(payment());
    thread::scope(|scope| {
        for n in 0..4 {
            let schema = Arc::clone(&schema);
            scope.spawn(move || {
                let outcome = schema
                    .feed([json!({"name": format!("user{n}"), "email": "e", "amount": n})])
                    .unwrap();
                assert!(outcome.is_success());
                assert_eq!(outcome.inputs()["amount"], Value::Integer(n));
            });
        }
    });
}
