//! Resource abstraction layer
//!
//! Generic machinery for HAL collections plus the data-driven resource
//! definitions built on it.
//!
//! # Architecture
//!
//! - [`transform`] - snake_case/camelCase key conversion and write-key picking
//! - [`envelope`] - HAL page parsing and item normalization
//! - [`pager`] - the lazy cursor-following [`Pages`] walker
//! - [`registry`] - resource definitions loaded from embedded JSON
//! - [`client`] - [`ResourceClient`], list/get/create/update for one resource
//!
//! # Example
//!
//! ```no_run
//! use roomkit::{ApiClient, Credentials, ListOptions, ResourceClient};
//!
//! async fn print_rooms() -> roomkit::Result<()> {
//!     let api = ApiClient::new("https://api-eu.vonage.com/v1", Credentials::bearer("jwt"), None)?;
//!     let rooms = ResourceClient::from_registry(api, "rooms").expect("rooms is built in");
//!
//!     let mut pages = rooms.list(ListOptions { page_size: Some(50) })?;
//!     while let Some(room) = pages.next().await {
//!         println!("{}", room?["displayName"]);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod envelope;
pub mod pager;
pub mod registry;
pub mod transform;

pub use client::{ListOptions, ResourceClient};
pub use envelope::Envelope;
pub use pager::{PageState, Pages};
pub use registry::{get_all_resource_keys, get_resource, ResourceDef};
