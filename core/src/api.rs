//! Async façade over `ItemClient`.
//!
//! Each operation builds one request, hands it to a `Transport` exactly once,
//! and parses the answer. There is no retry, cache, or shared mutable state;
//! every method takes `&self`, so any number of calls may be in flight at
//! once and their completions are unordered.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::ItemClient;
use crate::config::EndpointConfig;
use crate::error::{ApiError, BoxError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Item, ItemId};

/// Executes a single HTTP round-trip.
///
/// Non-2xx responses are returned as data. `Err` is reserved for requests
/// that never produced a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// `reqwest`-backed transport. Imposes no timeout of its own; pass a
/// configured `reqwest::Client` through `with_client` to get one.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// CRUD operations against `{base_url}/items`.
#[derive(Debug, Clone)]
pub struct ItemApi<T = ReqwestTransport> {
    client: ItemClient,
    transport: T,
}

impl ItemApi<ReqwestTransport> {
    pub fn new(config: &EndpointConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> ItemApi<T> {
    pub fn with_transport(config: &EndpointConfig, transport: T) -> Self {
        Self {
            client: ItemClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &ItemClient {
        &self.client
    }

    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        let req = self.client.build_list_items();
        let response = self.send(req).await?;
        observe(self.client.parse_list_items(response))
    }

    pub async fn get(&self, id: impl Into<ItemId>) -> Result<Item, ApiError> {
        let req = self.client.build_get_item(&id.into());
        let response = self.send(req).await?;
        observe(self.client.parse_get_item(response))
    }

    pub async fn create<P>(&self, payload: &P) -> Result<Item, ApiError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let req = observe(self.client.build_create_item(payload))?;
        let response = self.send(req).await?;
        observe(self.client.parse_create_item(response))
    }

    pub async fn update<P>(&self, id: impl Into<ItemId>, payload: &P) -> Result<Item, ApiError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let req = observe(self.client.build_update_item(&id.into(), payload))?;
        let response = self.send(req).await?;
        observe(self.client.parse_update_item(response))
    }

    pub async fn delete(&self, id: impl Into<ItemId>) -> Result<(), ApiError> {
        let req = self.client.build_delete_item(&id.into());
        let response = self.send(req).await?;
        observe(self.client.parse_delete_item(response))
    }

    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %req.method, url = %req.url, "sending request");
        let response = self
            .transport
            .execute(req)
            .await
            .map_err(ApiError::Transport);
        observe(response)
    }
}

/// Log failures on their way to the caller without altering them.
fn observe<V>(result: Result<V, ApiError>) -> Result<V, ApiError> {
    if let Err(err) = &result {
        tracing::warn!(error = %err, status = ?err.status(), "items api call failed");
    }
    result
}
