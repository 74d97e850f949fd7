//! Error type shared by the gateway, the page walker and resource clients.

use serde_json::Value;

/// Every failure the SDK can report to a caller.
///
/// All response-side variants are transport failures from the caller's
/// point of view: the request did not produce a usable resource. None of
/// them are retried here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server answered with a non-2xx status. `body` holds the parsed
    /// error envelope when the server sent JSON.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },

    /// Connection, timeout or body read failure below HTTP semantics.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body is not JSON.
    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// JSON of the wrong shape for the operation, e.g. a page whose
    /// `_embedded` is a string.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("auth: {0}")]
    Auth(String),
}

impl Error {
    /// True for failures that came back from (or on the way to) the server.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Error::Auth(_) | Error::InvalidUrl(_))
    }

    /// HTTP status code for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
