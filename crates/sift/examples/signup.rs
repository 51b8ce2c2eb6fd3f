//! Signup form example
//!
//! Demonstrates:
//! - Declaring a schema with nested maps and lists
//! - Kind defaults loaded from TOML
//! - Deriving an admin schema from the public one
//! - Reading codes and messages from a failed outcome
//!
//! Run with `RUST_LOG=sift=trace cargo run --example signup` to see the
//! builder and feed events.

use serde_json::json;
use sift::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULTS: &str = r#"
[string]
squish = true

[integer]
delimiter = "_, "
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Signup Form Example ===\n");

    // 1. Defaults shared by every filter of a kind
    let ctx = Arc::new(BuildContext::new(
        KindDefaults::from_toml_str(DEFAULTS)?,
        ModelRegistry::new(),
    ));

    // 2. The public signup form
    let signup = Schema::build_in(Arc::clone(&ctx), |s| {
        s.string("username", |o| {
            o.min_length = Some(3);
            o.max_length = Some(20);
            o.pattern = Some(r"^[a-z0-9_]+$".into());
        })
        .string("email", |o| o.pattern = Some(r"^[^@\s]+@[^@\s]+$".into()))
        .integer("age", |o| {
            o.min = Some(13);
            o.common.missing = Policy::Discard;
        })
        .boolean("newsletter", |o| o.common.missing = Policy::substitute(false))
        .list("interests", |o| o.wrap = true, |el| {
            el.string(|o| o.common.empty = Policy::Discard);
        })
        .map(
            "address",
            |o| o.common.missing = Policy::Discard,
            |a| {
                a.string("city", |_| {})
                    .string("postcode", |o| o.max_length = Some(10));
            },
        );
    })?;

    println!("1. Valid signup");
    let outcome = signup.feed([json!({
        "username": "ada_l",
        "email": "ada@example.com",
        "age": "36",
        "interests": "  computing   engines ",
        "address": {"city": "London", "postcode": "W1"}
    })])?;
    println!("   success: {}", outcome.is_success());
    println!("   inputs:  {}", Value::Map(outcome.inputs().clone()));
    println!();

    println!("2. Invalid signup");
    let outcome = signup.feed([
        json!({"username": "Ada Lovelace", "age": "12", "interests": ["", "maths", "x"]}),
        json!({"address": {"postcode": "NOT A REAL POSTCODE"}}),
    ])?;
    if let Some(errors) = outcome.errors() {
        println!("   codes:    {}", serde_json::to_string(&errors.codes())?);
        for message in errors.flattened_messages(&DefaultMessages) {
            println!("   - {message}");
        }
    }
    println!();

    // 3. Admins may set a role and skip the age check
    let admin = signup.extend(|s| {
        s.integer("age", |o| o.common.missing = Policy::Discard)
            .string("role", |o| {
                o.allowed_values = Some(vec!["admin".into(), "editor".into()]);
            });
    })?;

    println!("3. Derived admin schema");
    println!("   keys: {}", admin.keys().collect::<Vec<_>>().join(", "));
    match admin
        .feed([json!({"username": "root", "email": "r@x.io", "age": 9, "role": "owner"})])?
        .into_result()
    {
        Ok(inputs) => println!("   accepted: {}", Value::Map(inputs)),
        Err(failed) => println!("   rejected: {failed}"),
    }

    Ok(())
}
