//! Per-resource facade
//!
//! Combines a [`ResourceDef`] with an [`ApiClient`]: reads come back as
//! camelCase domain items, writes go out snake_case and restricted to the
//! resource's write keys. Callers may hand back a full fetched item; ids,
//! timestamps and links are dropped rather than rejected.

use super::envelope::normalize_item;
use super::pager::Pages;
use super::registry::{get_resource, ResourceDef};
use super::transform::{pick, to_wire};
use crate::api::client::ApiClient;
use crate::api::error::Result;
use serde_json::{Map, Value};

/// Options for [`ResourceClient::list`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Sent as `page_size` on the first request only
    pub page_size: Option<u32>,
}

#[derive(Clone)]
pub struct ResourceClient {
    client: ApiClient,
    def: ResourceDef,
}

impl ResourceClient {
    pub fn new(client: ApiClient, def: ResourceDef) -> Self {
        Self { client, def }
    }

    /// Client for a resource from the embedded registry
    pub fn from_registry(client: ApiClient, key: &str) -> Option<Self> {
        get_resource(key).map(|def| Self::new(client, def.clone()))
    }

    pub fn definition(&self) -> &ResourceDef {
        &self.def
    }

    /// Lazy walk over the whole collection. No request is made until the
    /// first item is pulled.
    pub fn list(&self, options: ListOptions) -> Result<Pages> {
        let url = self.client.first_page_url(&self.def.path, options.page_size)?;
        Ok(Pages::new(self.client.clone(), url))
    }

    pub async fn get(&self, id: &str) -> Result<Value> {
        let url = self.client.item_url(&self.def.path, id);
        let body = self.client.get(&url).await?;
        normalize_item(&body)
    }

    pub async fn create(&self, item: &Value) -> Result<Value> {
        let body = Value::Object(self.write_fields(item));
        tracing::debug!(resource = %self.def.path, fields = ?field_names(&body), "create");

        let url = self.client.collection_url(&self.def.path);
        let response = self.client.post(&url, &body).await?;
        normalize_item(&response)
    }

    pub async fn update(&self, id: &str, item: &Value) -> Result<Value> {
        let fields = self.write_fields(item);
        let body = match &self.def.update_envelope {
            Some(key) => {
                let mut envelope = Map::new();
                envelope.insert(key.clone(), Value::Object(fields));
                // Shallow: only the envelope key is renamed, the fields are
                // already wire format
                to_wire(&Value::Object(envelope), false)
            }
            None => Value::Object(fields),
        };
        tracing::debug!(resource = %self.def.path, id, "update");

        let url = self.client.item_url(&self.def.path, id);
        let response = self.client.patch(&url, &body).await?;
        normalize_item(&response)
    }

    /// Wire-format body restricted to the write keys
    pub fn write_fields(&self, item: &Value) -> Map<String, Value> {
        pick(&to_wire(item, true), &self.def.write_keys)
    }
}

fn field_names(body: &Value) -> Vec<&str> {
    body.as_object()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::Credentials;
    use serde_json::json;

    fn rooms() -> ResourceClient {
        let client =
            ApiClient::new("https://api.test/v1", Credentials::anonymous(), None).unwrap();
        ResourceClient::from_registry(client, "rooms").unwrap()
    }

    #[test]
    fn test_unknown_resource() {
        let client =
            ApiClient::new("https://api.test/v1", Credentials::anonymous(), None).unwrap();
        assert!(ResourceClient::from_registry(client, "widgets").is_none());
    }

    #[test]
    fn test_write_fields_drop_read_only_keys() {
        let room = json!({
            "id": "r1",
            "displayName": "Standup",
            "createdAt": "2024-01-01T00:00:00Z",
            "recordingOptions": {"autoRecord": true},
            "extra": 1,
        });
        let body = rooms().write_fields(&room);
        assert_eq!(
            Value::Object(body),
            json!({
                "display_name": "Standup",
                "recording_options": {"auto_record": true},
            })
        );
    }

    #[test]
    fn test_wire_input_is_accepted_as_is() {
        let room = json!({"display_name": "Standup", "theme_id": "t1", "meeting_code": "123"});
        let body = rooms().write_fields(&room);
        assert_eq!(
            Value::Object(body),
            json!({"display_name": "Standup", "theme_id": "t1"})
        );
    }

    #[test]
    fn test_list_is_lazy() {
        let pages = rooms().list(ListOptions { page_size: Some(5) }).unwrap();
        assert_eq!(pages.state(), crate::resource::pager::PageState::Uninitialized);
    }
}
