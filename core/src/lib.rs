//! Client core for the items service.
//!
//! # Overview
//! Resolves the backend base URL once at startup (`config`), shapes and
//! parses requests for the `/items` resource without I/O (`client`), and
//! runs them over a pluggable async transport (`api`).
//!
//! # Design
//! - `EndpointConfig` can only be obtained from `config::resolve`, which is
//!   total, so no operation runs against an empty base URL.
//! - `ItemClient` is stateless; each CRUD operation is split into `build_*`
//!   and `parse_*` so the I/O boundary is explicit.
//! - `ItemApi` performs exactly one transport call per operation and returns
//!   every failure to the caller unchanged.
//! - Items are opaque JSON objects; the backend owns their schema.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use api::{ItemApi, ReqwestTransport, Transport};
pub use client::ItemClient;
pub use config::{resolve, AppConfig, ConfigInputs, DeploymentMode, EndpointConfig};
pub use error::{ApiError, BoxError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Item, ItemId};
