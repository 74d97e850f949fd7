//! Resource Registry - Load resource definitions from JSON
//!
//! Resource definitions are embedded at compile time, so adding a resource
//! with the usual list/get/create/update shape needs no code.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[include_str!("../resources/meetings.json")];

/// Resource definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub display_name: String,
    /// Collection path relative to the API root
    pub path: String,
    /// Domain-format key holding the item id
    pub id_field: String,
    /// Domain-format key used when printing a one-line summary
    pub name_field: String,
    /// Wire-format fields allowed in create/update bodies, in send order
    pub write_keys: Vec<String>,
    /// Domain-format key update bodies are wrapped under, if any
    #[serde(default)]
    pub update_envelope: Option<String>,
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource definition by key
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(key)
}

/// Get all resource keys, sorted
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads_successfully() {
        assert!(
            !get_registry().resources.is_empty(),
            "Registry should have resources"
        );
    }

    #[test]
    fn test_rooms_resource_exists() {
        let rooms = get_resource("rooms").expect("rooms resource should exist");
        assert_eq!(rooms.path, "meetings/rooms");
        assert_eq!(rooms.update_envelope.as_deref(), Some("updateOptions"));
        assert!(rooms.write_keys.iter().any(|k| k == "display_name"));
        assert!(!rooms.write_keys.iter().any(|k| k == "id"));
    }

    #[test]
    fn test_write_keys_are_wire_format() {
        for def in get_registry().resources.values() {
            for key in &def.write_keys {
                assert!(
                    !key.chars().any(|c| c.is_uppercase()),
                    "{} write key {} should be snake_case",
                    def.display_name,
                    key
                );
            }
        }
    }

    #[test]
    fn test_get_all_resource_keys() {
        assert_eq!(get_all_resource_keys(), vec!["rooms", "themes"]);
    }
}
