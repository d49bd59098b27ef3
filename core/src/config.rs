//! Startup configuration for the item client.
//!
//! # Design
//! The base URL is chosen by a pure, precedence-ordered function over an
//! explicit `ConfigInputs` bundle. Only `ConfigInputs::from_env` touches the
//! process environment, so the resolver and everything downstream of it can
//! be tested without mutating global state.
//!
//! Precedence, first match wins:
//! 1. `API_BASE_URL`, if non-empty.
//! 2. `ENVIRONMENT=production` → in-cluster service address.
//! 3. `ENVIRONMENT=development` → localhost backend.
//! 4. Hardcoded fallback (the dev-proxy `/api` prefix).

use std::env;

pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
pub const APP_NAME_VAR: &str = "APP_NAME";
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
pub const DEBUG_VAR: &str = "DEBUG";

/// Service-discovery name of the backend, reachable only inside the
/// deployment network.
pub const PRODUCTION_BASE_URL: &str = "http://backend:8080";
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:8080";
pub const FALLBACK_BASE_URL: &str = "http://localhost:3001/api";

pub const DEFAULT_APP_NAME: &str = "Distributed Systems Lab - Shop App";

/// Coarse deployment flag, used only to pick a default base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Production,
    Development,
    Unset,
}

impl DeploymentMode {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return DeploymentMode::Unset;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => DeploymentMode::Production,
            "development" | "dev" | "local" => DeploymentMode::Development,
            _ => DeploymentMode::Unset,
        }
    }
}

/// Raw, optional configuration values as read from the outside world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigInputs {
    pub api_base_url: Option<String>,
    pub app_name: Option<String>,
    pub environment: Option<String>,
    pub debug: Option<String>,
}

impl ConfigInputs {
    /// Collect inputs through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_base_url: lookup(API_BASE_URL_VAR),
            app_name: lookup(APP_NAME_VAR),
            environment: lookup(ENVIRONMENT_VAR),
            debug: lookup(DEBUG_VAR),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn mode(&self) -> DeploymentMode {
        DeploymentMode::parse(self.environment.as_deref())
    }
}

/// The resolved backend location. Never empty, never ends in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    base_url: String,
}

impl EndpointConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Pick the base URL for `inputs`. Total: always returns a usable value.
pub fn resolve(inputs: &ConfigInputs) -> EndpointConfig {
    let explicit = inputs
        .api_base_url
        .as_deref()
        .map(|raw| raw.trim().trim_end_matches('/'))
        .filter(|url| !url.is_empty());

    let base_url = match (explicit, inputs.mode()) {
        (Some(url), _) => url,
        (None, DeploymentMode::Production) => PRODUCTION_BASE_URL,
        (None, DeploymentMode::Development) => DEVELOPMENT_BASE_URL,
        (None, DeploymentMode::Unset) => FALLBACK_BASE_URL,
    };

    EndpointConfig {
        base_url: base_url.to_string(),
    }
}

/// Full runtime configuration of the item frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub app_name: String,
    pub debug: bool,
}

impl AppConfig {
    pub fn resolve(inputs: &ConfigInputs) -> Self {
        let app_name = inputs
            .app_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_APP_NAME)
            .to_string();
        let debug = inputs
            .debug
            .as_deref()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"));

        Self {
            endpoint: resolve(inputs),
            app_name,
            debug,
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(&ConfigInputs::from_env())
    }
}
