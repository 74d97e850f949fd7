//! HAL page envelopes
//!
//! A collection page looks like
//! `{"_embedded": [...], "_links": {"self": {"href"}, "next": {"href"}},
//! "page_size", "total_items"}`.
//! Plain HAL (`"_embedded": {"rooms": [...]}`) and bare JSON arrays are
//! accepted as well.

use super::transform::to_domain;
use crate::api::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

const EMBEDDED: &str = "_embedded";
const LINKS: &str = "_links";
const NEXT: &str = "next";

/// One parsed collection page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    /// Raw wire items in server order
    pub items: Vec<Value>,
    /// Relation name -> href
    pub links: HashMap<String, String>,
    pub page_size: Option<u64>,
    pub total_items: Option<u64>,
}

impl Envelope {
    /// Parse a page body. Fails with `MalformedEnvelope` when the body is
    /// neither an object nor an array, or when `_embedded`/`next` have the
    /// wrong shape.
    pub fn parse(body: Value) -> Result<Self> {
        let mut map = match body {
            Value::Object(map) => map,
            // A bare array is a single, final page
            Value::Array(items) => {
                return Ok(Self {
                    items,
                    ..Self::default()
                })
            }
            other => {
                return Err(Error::MalformedEnvelope(format!(
                    "expected a page object, got {}",
                    kind(&other)
                )))
            }
        };

        let items = match map.remove(EMBEDDED) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(Value::Object(named)) => first_array(named),
            Some(other) => {
                return Err(Error::MalformedEnvelope(format!(
                    "`{EMBEDDED}` must be an array, got {}",
                    kind(&other)
                )))
            }
        };

        let links = match map.get(LINKS) {
            Some(Value::Object(links)) => parse_links(links)?,
            _ => HashMap::new(),
        };

        Ok(Self {
            items,
            links,
            page_size: map.get("page_size").and_then(Value::as_u64),
            total_items: map.get("total_items").and_then(Value::as_u64),
        })
    }

    /// The continuation href; `None` on the last page
    pub fn next_href(&self) -> Option<&str> {
        self.links.get(NEXT).map(String::as_str)
    }
}

/// Plain HAL nests the items under a relation name; take the first array.
fn first_array(named: Map<String, Value>) -> Vec<Value> {
    named
        .into_iter()
        .find_map(|(_, v)| match v {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .unwrap_or_default()
}

fn parse_links(links: &Map<String, Value>) -> Result<HashMap<String, String>> {
    let mut out = HashMap::new();
    for (rel, link) in links {
        // HAL allows a relation to hold an array of link objects
        let link = match link {
            Value::Array(list) => list.first().unwrap_or(&Value::Null),
            other => other,
        };
        // `"next": null` (or `[]`) means there is no such relation
        if link.is_null() {
            continue;
        }
        match link.get("href").and_then(Value::as_str) {
            Some(href) => {
                out.insert(rel.clone(), href.to_string());
            }
            None if rel.as_str() == NEXT => {
                return Err(Error::MalformedEnvelope(
                    "`next` link has no href".to_string(),
                ))
            }
            None => {}
        }
    }
    Ok(out)
}

/// Turn one wire item into a domain item: link metadata removed, keys
/// camelCased all the way down.
pub fn normalize_item(item: &Value) -> Result<Value> {
    let Value::Object(map) = item else {
        return Err(Error::MalformedEnvelope(format!(
            "expected an item object, got {}",
            kind(item)
        )));
    };
    let stripped: Map<String, Value> = map
        .iter()
        .filter(|(k, _)| k.as_str() != LINKS)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok(to_domain(&Value::Object(stripped), true))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
