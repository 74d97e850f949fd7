//! API interaction module
//!
//! Everything that touches HTTP lives here; the resource layer above only
//! sees JSON values.
//!
//! # Module Structure
//!
//! - [`auth`] - bearer token sources and caching
//! - [`client`] - base URL binding and URL builders
//! - [`error`] - the crate-wide error type
//! - [`http`] - the [`http::HttpGateway`] seam and its reqwest implementation

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
