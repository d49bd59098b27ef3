use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub const VERSION: &str = "1.0.0";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://frontend:3000";
const MAX_NAME_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub quantity: u64,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub quantity: u64,
}

/// Fields present in the body replace the stored ones.
#[derive(Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub quantity: Option<u64>,
}

/// Process settings, read once from the environment.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read settings through `lookup`. A malformed `PORT` is an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let raw_port = var("PORT", "8080");
        let port = raw_port
            .trim()
            .parse::<u16>()
            .with_context(|| format!("invalid PORT {raw_port:?}"))?;
        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            environment: var("ENVIRONMENT", "development"),
            allowed_origins: parse_origins(&var("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

struct Store {
    items: Vec<Item>,
    next_id: u64,
}

impl Store {
    fn seeded() -> Self {
        let items = [("Apple", 42), ("Banana", 25), ("Orange", 30)]
            .into_iter()
            .zip(1..)
            .map(|((name, quantity), id)| Item {
                id,
                name: name.to_string(),
                quantity,
            })
            .collect::<Vec<_>>();
        let next_id = items.len() as u64 + 1;
        Self { items, next_id }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    environment: Arc<str>,
}

/// Error body shape: `{"detail": "..."}`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    detail: String,
}

impl HttpError {
    fn not_found(id: u64) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: format!("Item with id {id} not found"),
        }
    }

    fn invalid(detail: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

fn validate_name(name: &str) -> Result<(), HttpError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(HttpError::invalid("name must be between 1 and 100 characters"));
    }
    Ok(())
}

/// `*` anywhere in the list allows every origin.
pub fn cors(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn app() -> Router {
    app_with_config(&ServerConfig::default())
}

pub fn app_with_config(config: &ServerConfig) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store::seeded())),
        environment: Arc::from(config.environment.as_str()),
    };
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .layer(cors(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Item Management API",
        "version": VERSION,
        "health": "/health",
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let items_count = state.store.read().await.items.len();
    Json(json!({
        "status": "healthy",
        "items_count": items_count,
        "environment": &*state.environment,
    }))
}

async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    let items = state.store.read().await.items.clone();
    Json(items)
}

async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> Result<(StatusCode, Json<Item>), HttpError> {
    validate_name(&input.name)?;
    let mut store = state.store.write().await;
    let item = Item {
        id: store.next_id,
        name: input.name,
        quantity: input.quantity,
    };
    store.next_id += 1;
    store.items.push(item.clone());
    tracing::info!(id = item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Item>, HttpError> {
    let store = state.store.read().await;
    let item = store
        .items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or_else(|| HttpError::not_found(id))?;
    Ok(Json(item))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateItem>,
) -> Result<Json<Item>, HttpError> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let mut store = state.store.write().await;
    let index = store.position(id).ok_or_else(|| HttpError::not_found(id))?;
    let item = &mut store.items[index];
    if let Some(name) = input.name {
        item.name = name;
    }
    if let Some(quantity) = input.quantity {
        item.quantity = quantity;
    }
    let updated = item.clone();
    Ok(Json(updated))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, HttpError> {
    let mut store = state.store.write().await;
    let index = store.position(id).ok_or_else(|| HttpError::not_found(id))?;
    store.items.remove(index);
    tracing::info!(id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
