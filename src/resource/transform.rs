//! Key-case normalization and write-field filtering
//!
//! The wire speaks snake_case, callers see camelCase. Both directions are
//! pure functions over `serde_json::Value`; nothing here mutates its input.

use serde_json::{Map, Value};

/// `display_name` -> `displayName`
///
/// Splits on `_`, drops empty segments and capitalizes the first character
/// of every segment after the first.
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, segment) in key.split('_').filter(|s| !s.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `displayName` -> `display_name`
pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Wire -> domain. With `deep` every nested object is renamed as well.
///
/// Keys that rename to the same name collapse into one entry; the value of
/// the last such key in the object wins.
pub fn to_domain(value: &Value, deep: bool) -> Value {
    rename_keys(value, deep, &camel_case)
}

/// Domain -> wire. With `deep` every nested object is renamed as well.
pub fn to_wire(value: &Value, deep: bool) -> Value {
    rename_keys(value, deep, &snake_case)
}

fn rename_keys(value: &Value, deep: bool, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if deep {
                        rename_keys(v, true, rename)
                    } else {
                        v.clone()
                    };
                    (rename(k), v)
                })
                .collect(),
        ),
        Value::Array(items) if deep => {
            Value::Array(items.iter().map(|v| rename_keys(v, true, rename)).collect())
        }
        other => other.clone(),
    }
}

/// Keep only `allowed` keys, in the order of `allowed`. Missing keys are
/// left out rather than set to null; a non-object yields an empty map.
pub fn pick<S: AsRef<str>>(object: &Value, allowed: &[S]) -> Map<String, Value> {
    let mut out = Map::new();
    let Some(map) = object.as_object() else {
        return out;
    };
    for key in allowed {
        let key = key.as_ref();
        if let Some(v) = map.get(key) {
            out.insert(key.to_string(), v.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_keys() {
        assert_eq!(camel_case("display_name"), "displayName");
        assert_eq!(camel_case("is_recording_available"), "isRecordingAvailable");
        assert_eq!(camel_case("id"), "id");
        assert_eq!(camel_case("_links"), "links");
        assert_eq!(camel_case("already_camelCase"), "alreadyCamelCase");
    }

    #[test]
    fn test_snake_case_keys() {
        assert_eq!(snake_case("displayName"), "display_name");
        assert_eq!(snake_case("isRecordingAvailable"), "is_recording_available");
        assert_eq!(snake_case("id"), "id");
        assert_eq!(snake_case("page_size"), "page_size");
    }

    #[test]
    fn test_deep_transform_renames_nested_objects_in_arrays() {
        let wire = json!({
            "display_name": "Sync",
            "recording_options": {"auto_record": false},
            "callback_urls": [{"rooms_callback_url": "https://a"}, null, 3],
        });
        let domain = to_domain(&wire, true);
        assert_eq!(
            domain,
            json!({
                "displayName": "Sync",
                "recordingOptions": {"autoRecord": false},
                "callbackUrls": [{"roomsCallbackUrl": "https://a"}, null, 3],
            })
        );
        assert_eq!(to_wire(&domain, true), wire);
    }

    #[test]
    fn test_shallow_transform_leaves_nested_values() {
        let domain = json!({"updateOptions": {"displayName": "x"}});
        assert_eq!(
            to_wire(&domain, false),
            json!({"update_options": {"displayName": "x"}})
        );
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(to_domain(&json!(null), true), json!(null));
        assert_eq!(to_wire(&json!("snake_case_string"), true), json!("snake_case_string"));
        assert_eq!(to_domain(&json!([1, "a_b"]), true), json!([1, "a_b"]));
    }

    #[test]
    fn test_to_domain_is_idempotent_on_camel_keys() {
        let domain = json!({"pageSize": 1, "nested": {"totalItems": 2}});
        assert_eq!(to_domain(&domain, true), domain);
    }

    #[test]
    fn test_colliding_keys_last_one_wins() {
        let mixed = json!({"display_name": 1, "displayName": 2});
        assert_eq!(to_domain(&mixed, true), json!({"displayName": 2}));

        let mixed = json!({"displayName": 2, "display_name": 1});
        assert_eq!(to_domain(&mixed, true), json!({"displayName": 1}));
        assert_eq!(to_wire(&mixed, false), json!({"display_name": 1}));
    }

    #[test]
    fn test_pick_keeps_allowed_order_and_skips_missing() {
        let obj = json!({"id": "1", "name": "room", "extra": true, "theme_id": "t"});
        let picked = pick(&obj, &["theme_id", "name", "metadata"]);
        let keys: Vec<&str> = picked.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["theme_id", "name"]);
        assert!(!picked.contains_key("metadata"));
    }

    #[test]
    fn test_pick_on_non_object_is_empty() {
        assert!(pick(&json!([1, 2]), &["a"]).is_empty());
    }
}
