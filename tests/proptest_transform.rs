//! Property-based tests using proptest
//!
//! These tests check the key-case transform laws and write-key picking
//! over randomly generated nested JSON values.

use proptest::prelude::*;
use roomkit::{pick, to_domain, to_wire};
use serde_json::Value;

const SNAKE_KEY: &str = "[a-z]{1,6}(_[a-z]{1,6}){0,3}";
const CAMEL_KEY: &str = "[a-z]{1,6}([A-Z][a-z]{1,6}){0,3}";

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // String values must never be touched, even snake/camel looking ones
        "[a-zA-Z_ ]{0,12}".prop_map(Value::from),
    ]
}

/// Arbitrary nested JSON whose object keys all follow `key_pattern`
fn nested(key_pattern: &'static str) -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key_pattern, inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Structure without key names: nesting, array lengths and leaf values
fn shape(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Array(map.values().map(shape).collect()),
        Value::Array(items) => Value::Array(vec![
            Value::from(items.len()),
            Value::Array(items.iter().map(shape).collect()),
        ]),
        other => other.clone(),
    }
}

fn has_upper_key(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| k.chars().any(char::is_uppercase) || has_upper_key(v)),
        Value::Array(items) => items.iter().any(has_upper_key),
        _ => false,
    }
}

proptest! {
    /// wire -> domain -> wire is the identity
    #[test]
    fn wire_round_trip(value in nested(SNAKE_KEY)) {
        prop_assert_eq!(to_wire(&to_domain(&value, true), true), value);
    }

    /// domain -> wire -> domain is the identity
    #[test]
    fn domain_round_trip(value in nested(CAMEL_KEY)) {
        prop_assert_eq!(to_domain(&to_wire(&value, true), true), value);
    }

    /// camelCase input is already normalized
    #[test]
    fn to_domain_is_idempotent(value in nested(SNAKE_KEY)) {
        let once = to_domain(&value, true);
        prop_assert_eq!(to_domain(&once, true), once);
    }

    /// Deep transforms keep nesting, array lengths and values
    #[test]
    fn deep_transform_preserves_shape(value in nested(SNAKE_KEY)) {
        prop_assert_eq!(shape(&to_domain(&value, true)), shape(&value));
    }

    /// Deep wire conversion leaves no upper-case key anywhere
    #[test]
    fn to_wire_has_no_upper_case_keys(value in nested(CAMEL_KEY)) {
        prop_assert!(!has_upper_key(&to_wire(&value, true)));
    }

    /// Shallow transforms never touch nested values
    #[test]
    fn shallow_transform_keeps_nested_values(value in nested(SNAKE_KEY)) {
        let shallow = to_domain(&value, false);
        if let (Value::Object(before), Value::Object(after)) = (&value, &shallow) {
            let before: Vec<&Value> = before.values().collect();
            let after: Vec<&Value> = after.values().collect();
            prop_assert_eq!(before, after);
        } else {
            prop_assert_eq!(shallow, value);
        }
    }

    /// pick returns exactly the allowed keys that are present
    #[test]
    fn pick_is_intersection(
        value in prop::collection::btree_map(SNAKE_KEY, leaf(), 0..8)
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        allowed in prop::collection::vec(SNAKE_KEY, 0..8)
    ) {
        let picked = pick(&value, &allowed);
        let source = value.as_object().unwrap();
        for (k, v) in &picked {
            prop_assert!(allowed.contains(k));
            prop_assert_eq!(source.get(k), Some(v));
        }
        for k in &allowed {
            prop_assert_eq!(picked.contains_key(k), source.contains_key(k));
        }
    }
}
