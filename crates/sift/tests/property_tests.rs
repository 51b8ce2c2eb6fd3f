//! Property-based tests for feeding.

use proptest::prelude::*;
use serde_json::json;
use sift::prelude::*;

fn schema() -> Schema {
    Schema::build(|s| {
        s.string("name", |o| o.max_length = Some(12))
            .integer("age", |o| {
                o.min = Some(0);
                o.common.missing = Policy::Discard;
            })
            .boolean("active", |o| o.common.nils = Policy::Allow)
            .list("tags", |o| o.common.missing = Policy::substitute(json!([])), |el| {
                el.string(|o| o.common.empty = Policy::Discard);
            })
            .map(
                "address",
                |o| o.common.missing = Policy::Discard,
                |a| {
                    a.string("city", |_| {}).float("lat", |o| {
                        o.common.missing = Policy::Allow;
                    });
                },
            );
    })
    .unwrap()
}

fn raw_scalar() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i32>().prop_map(serde_json::Value::from),
        (-1.0e6..1.0e6f64).prop_map(serde_json::Value::from),
        "[ a-z0-9,.]{0,16}".prop_map(serde_json::Value::from),
    ]
}

fn raw_input() -> impl Strategy<Value = serde_json::Value> {
    (
        proptest::option::of(raw_scalar()),
        proptest::option::of(raw_scalar()),
        proptest::option::of(raw_scalar()),
        proptest::option::of(proptest::collection::vec(raw_scalar(), 0..5)),
        proptest::option::of((raw_scalar(), raw_scalar())),
    )
        .prop_map(|(name, age, active, tags, address)| {
            let mut input = serde_json::Map::new();
            let fields = [("name", name), ("age", age), ("active", active)];
            for (key, value) in fields {
                if let Some(value) = value {
                    input.insert(key.into(), value);
                }
            }
            if let Some(tags) = tags {
                input.insert("tags".into(), serde_json::Value::Array(tags));
            }
            if let Some((city, lat)) = address {
                input.insert("address".into(), json!({"city": city, "lat": lat}));
            }
            serde_json::Value::Object(input)
        })
}

/// Raw records that mostly satisfy `schema()`, in every shape its kinds
/// coerce from: numbers and booleans as names, digit text as ages, flag
/// words, scalar tags that blank out and coordinates as integers.
fn valid_input() -> impl Strategy<Value = serde_json::Value> {
    let name = prop_oneof![
        " {0,2}[a-z][a-z0-9 ]{0,10}".prop_map(serde_json::Value::from),
        any::<u16>().prop_map(serde_json::Value::from),
        any::<bool>().prop_map(serde_json::Value::from),
    ];
    let age = prop_oneof![
        (0..150i64).prop_map(serde_json::Value::from),
        (0..100_000u32).prop_map(|n| serde_json::Value::from(n.to_string())),
        (1..100u32).prop_map(|n| serde_json::Value::from(format!("{n},000"))),
    ];
    let active = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        prop::sample::select(vec!["true", "False", " 1 ", "0"]).prop_map(serde_json::Value::from),
        (0..2i64).prop_map(serde_json::Value::from),
    ];
    let tag = prop_oneof![
        "[a-z ]{0,6}".prop_map(serde_json::Value::from),
        any::<i32>().prop_map(serde_json::Value::from),
        any::<bool>().prop_map(serde_json::Value::from),
    ];
    let lat = prop_oneof![
        (-90.0..90.0f64).prop_map(serde_json::Value::from),
        (-90..90i64).prop_map(serde_json::Value::from),
    ];
    (
        name,
        proptest::option::of(age),
        active,
        proptest::option::of(proptest::collection::vec(tag, 0..5)),
        proptest::option::of(("[a-z]{1,10}", proptest::option::of(lat))),
    )
        .prop_map(|(name, age, active, tags, address)| {
            let mut input = serde_json::Map::new();
            input.insert("name".into(), name);
            if let Some(age) = age {
                input.insert("age".into(), age);
            }
            input.insert("active".into(), active);
            if let Some(tags) = tags {
                input.insert("tags".into(), serde_json::Value::Array(tags));
            }
            if let Some((city, lat)) = address {
                let mut address = serde_json::Map::new();
                address.insert("city".into(), city.into());
                if let Some(lat) = lat {
                    address.insert("lat".into(), lat);
                }
                input.insert("address".into(), serde_json::Value::Object(address));
            }
            serde_json::Value::Object(input)
        })
}

// ============================================================================
// IDEMPOTENCE: feeding the output of a successful feed changes nothing
// ============================================================================

proptest! {
    #[test]
    fn successful_outputs_are_fixed_points(input in valid_input()) {
        let schema = schema();
        let first = schema.feed([input]).unwrap();
        prop_assume!(first.is_success());

        let second = schema.feed([Value::Map(first.inputs().clone())]).unwrap();
        prop_assert!(second.is_success());
        prop_assert_eq!(second.inputs(), first.inputs());
    }
}

// ============================================================================
// ERROR SHAPE: error keys are declared keys, composites nest correctly
// ============================================================================

proptest! {
    #[test]
    fn generated_records_feed_cleanly(input in valid_input()) {
        let outcome = schema().feed([input]).unwrap();
        prop_assert!(outcome.is_success(), "{:?}", outcome.errors());
    }

    #[test]
    fn error_shape_mirrors_the_schema(input in raw_input()) {
        let schema = schema();
        let outcome = schema.feed([input]).unwrap();
        let Some(errors) = outcome.errors() else {
            return Ok(());
        };

        for (key, node) in errors.iter() {
            let filter = schema.get(key);
            prop_assert!(filter.is_some(), "undeclared error key {}", key);
            match node {
                ErrorNode::Atom(_) => {}
                ErrorNode::List(_) => prop_assert_eq!(key, "tags"),
                ErrorNode::Map(fields) => {
                    prop_assert_eq!(key, "address");
                    for field in fields.keys() {
                        prop_assert!(["city", "lat"].contains(&field));
                    }
                }
            }
            prop_assert!(!outcome.inputs().contains_key(key));
        }
    }

    #[test]
    fn feeding_is_deterministic(input in raw_input()) {
        let schema = schema();
        let first = schema.feed([input.clone()]).unwrap();
        let second = schema.feed([input]).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// DISCARD COMPACTION: kept elements keep their order, nothing else survives
// ============================================================================

proptest! {
    #[test]
    fn discarded_elements_are_compacted(items in proptest::collection::vec(any::<Option<i16>>(), 0..12)) {
        let schema = Schema::build(|s| {
            s.list("values", |_| {}, |el| {
                el.integer(|o| o.common.nils = Policy::Discard);
            });
        })
        .unwrap();

        let raw: Vec<serde_json::Value> = items
            .iter()
            .map(|item| item.map_or(serde_json::Value::Null, serde_json::Value::from))
            .collect();
        let outcome = schema.feed([json!({"values": raw})]).unwrap();
        prop_assert!(outcome.is_success());

        let expected: Vec<Value> = items.iter().flatten().map(|n| Value::from(i64::from(*n))).collect();
        prop_assert_eq!(&outcome.inputs()["values"], &Value::List(expected));
    }
}
