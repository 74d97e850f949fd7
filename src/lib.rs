//! Client SDK for cursor-paginated, HAL-style meeting-room APIs.
//!
//! The server speaks snake_case inside HAL envelopes; callers get plain
//! camelCase JSON objects. Collections are walked lazily, one page per
//! request, following the server's `next` links. Writes are restricted to
//! each resource's allow-listed fields.
//!
//! - [`api`] - HTTP gateway, credentials, errors
//! - [`resource`] - key-case transforms, page walker, resource clients
//! - [`config`] - persisted settings used by the `roomkit` binary

pub mod api;
pub mod config;
pub mod resource;

pub use api::auth::{Credentials, EnvToken, StaticToken, TokenSource};
pub use api::client::{ApiClient, DEFAULT_BASE_URL};
pub use api::error::{Error, Result};
pub use api::http::{HttpGateway, ReqwestGateway};
pub use resource::transform::{pick, to_domain, to_wire};
pub use resource::{ListOptions, PageState, Pages, ResourceClient, ResourceDef};
