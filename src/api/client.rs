//! API Client
//!
//! Binds a gateway to a base URL and provides URL builders plus thin
//! GET/POST/PATCH helpers used by resource clients and the page walker.

use super::auth::Credentials;
use super::error::Result;
use super::http::{HttpGateway, ReqwestGateway};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default API root for the meetings service
pub const DEFAULT_BASE_URL: &str = "https://api-eu.vonage.com/v1";

/// Main API client. Cheap to clone; clones share the gateway.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<dyn HttpGateway>,
    base_url: String,
    /// Sent with every request, e.g. tracing or tenant headers
    headers: Option<HeaderMap>,
}

impl ApiClient {
    /// Create a client over the production reqwest gateway
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let gateway = ReqwestGateway::new(credentials, timeout)?;
        Self::with_gateway(base_url, Arc::new(gateway))
    }

    /// Create a client over any gateway
    pub fn with_gateway(base_url: &str, gateway: Arc<dyn HttpGateway>) -> Result<Self> {
        // Validate once so later joins only fail on server-supplied links
        Url::parse(base_url)?;

        Ok(Self {
            gateway,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: None,
        })
    }

    /// Attach headers to every request made through this client
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, url: &str) -> Result<Value> {
        self.gateway
            .request(Method::GET, url, None, self.headers.as_ref())
            .await
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.gateway
            .request(Method::POST, url, Some(body), self.headers.as_ref())
            .await
    }

    pub async fn patch(&self, url: &str, body: &Value) -> Result<Value> {
        self.gateway
            .request(Method::PATCH, url, Some(body), self.headers.as_ref())
            .await
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Collection URL, e.g. `{base}/meetings/rooms`
    pub fn collection_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_matches('/'))
    }

    /// Single item URL with the id percent-encoded as one path segment
    pub fn item_url(&self, path: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(path), urlencoding::encode(id))
    }

    /// First page URL of a collection, with `page_size` when given
    pub fn first_page_url(&self, path: &str, page_size: Option<u32>) -> Result<String> {
        let mut url = Url::parse(&self.collection_url(path))?;
        if let Some(size) = page_size {
            url.query_pairs_mut()
                .append_pair("page_size", &size.to_string());
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("https://api.example.com/v1/", Credentials::anonymous(), None).unwrap()
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        assert_eq!(client().base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn test_collection_and_item_urls() {
        let c = client();
        assert_eq!(
            c.collection_url("/meetings/rooms"),
            "https://api.example.com/v1/meetings/rooms"
        );
        assert_eq!(
            c.item_url("meetings/rooms", "my awesome/room"),
            "https://api.example.com/v1/meetings/rooms/my%20awesome%2Froom"
        );
    }

    #[test]
    fn test_first_page_url_with_and_without_page_size() {
        let c = client();
        assert_eq!(
            c.first_page_url("meetings/rooms", None).unwrap(),
            "https://api.example.com/v1/meetings/rooms"
        );
        assert_eq!(
            c.first_page_url("meetings/rooms", Some(1)).unwrap(),
            "https://api.example.com/v1/meetings/rooms?page_size=1"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url", Credentials::anonymous(), None)
            .err()
            .expect("should fail");
        assert!(matches!(err, crate::Error::InvalidUrl(_)));
    }
}
