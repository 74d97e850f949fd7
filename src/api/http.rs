//! HTTP gateway for the meetings REST API
//!
//! The core only ever talks to an [`HttpGateway`]. [`ReqwestGateway`] is the
//! production implementation; tests and embedders can swap in their own.

use super::auth::Credentials;
use super::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("roomkit/", env!("CARGO_PKG_VERSION"));

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Executes one request and returns the decoded JSON body.
///
/// `headers` are extra request headers on top of whatever the gateway adds
/// itself (auth, user agent). Implementations must fail with
/// [`Error::Status`] on any non-2xx status and must not retry. A successful
/// response with an empty body is `Value::Null`.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<Value>;
}

/// reqwest-backed gateway attaching bearer credentials
#[derive(Clone)]
pub struct ReqwestGateway {
    client: Client,
    credentials: Credentials,
}

impl ReqwestGateway {
    /// Create a new gateway with an optional request timeout
    pub fn new(credentials: Credentials, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            credentials,
        })
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(headers) = headers {
            request = request.headers(headers.clone());
        }
        if let Some(token) = self.credentials.get_token().await? {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&text));
            return Err(Error::Status {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
            });
        }

        // Handle empty response
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
