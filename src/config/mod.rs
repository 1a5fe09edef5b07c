//! Configuration management for authflow
//!
//! All settings come from the environment with fixed fallbacks; there is no
//! config file and no reload mechanism. Values are read once at startup and
//! the resulting [`Config`] is immutable for the life of the process.

use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, DEFAULT_LOGOUT_REDIRECT_URI,
    DEFAULT_REDIRECT_URI, DEFAULT_SCOPE, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_ENDPOINT,
    ENV_LOGOUT_REDIRECT_URI, ENV_PORT, ENV_REDIRECT_URI, ENV_SCOPE,
};
use serde::{Deserialize, Serialize};
use std::env;

/// Complete authflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identity provider base URL (realm URL, no trailing slash)
    pub endpoint: String,

    /// OAuth client id registered with the provider
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Redirect URI the provider sends the authorization code to
    pub redirect_uri: String,

    /// Where the provider sends the browser after logout
    pub logout_redirect_uri: String,

    /// Scope string requested in the authorization leg
    pub scope: String,

    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Every variable is optional; unset or empty values fall back to the
    /// defaults in [`crate::constants`]. Client id and secret fall back to
    /// empty strings, a misconfiguration that is deliberately not rejected
    /// here, only warned about, because the flow surfaces it later as a
    /// failed token exchange.
    pub fn from_env() -> Self {
        let endpoint = env_or(ENV_ENDPOINT, DEFAULT_ENDPOINT)
            .trim_end_matches('/')
            .to_string();

        let config = Self {
            endpoint,
            client_id: env_or(ENV_CLIENT_ID, ""),
            client_secret: env_or(ENV_CLIENT_SECRET, ""),
            redirect_uri: env_or(ENV_REDIRECT_URI, DEFAULT_REDIRECT_URI),
            logout_redirect_uri: env_or(ENV_LOGOUT_REDIRECT_URI, DEFAULT_LOGOUT_REDIRECT_URI),
            scope: env_or(ENV_SCOPE, DEFAULT_SCOPE),
            host: DEFAULT_HTTP_HOST.to_string(),
            port: port_from_env(),
        };

        if config.client_id.is_empty() || config.client_secret.is_empty() {
            tracing::warn!(
                "{} / {} not set; the token exchange will fail until they are",
                ENV_CLIENT_ID,
                ENV_CLIENT_SECRET
            );
        }

        config
    }

    /// Address string for the TCP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            logout_redirect_uri: DEFAULT_LOGOUT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Read an environment variable, treating unset and empty the same way.
fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse `PORT`, falling back to the default on anything unparseable.
fn port_from_env() -> u16 {
    match env::var(ENV_PORT) {
        Ok(raw) if !raw.is_empty() => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {}={:?}", ENV_PORT, raw);
            DEFAULT_HTTP_PORT
        }),
        _ => DEFAULT_HTTP_PORT,
    }
}
