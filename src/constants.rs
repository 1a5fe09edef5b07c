//! Constants used throughout authflow
//!
//! This module contains all constant values used by the demo harness:
//! environment variable names, configuration fallbacks, identity-provider
//! path layout, and session/cookie parameters.

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Environment variable: identity provider base URL (realm URL)
pub const ENV_ENDPOINT: &str = "KEYCLOAK_ENDPOINT";

/// Environment variable: OAuth client id
pub const ENV_CLIENT_ID: &str = "KEYCLOAK_CLIENT_ID";

/// Environment variable: OAuth client secret
pub const ENV_CLIENT_SECRET: &str = "KEYCLOAK_CLIENT_SECRET";

/// Environment variable: redirect URI registered for the callback leg
pub const ENV_REDIRECT_URI: &str = "KEYCLOAK_REDIRECT_URI";

/// Environment variable: post-logout redirect URI
pub const ENV_LOGOUT_REDIRECT_URI: &str = "KEYCLOAK_LOGOUT_REDIRECT_URI";

/// Environment variable: requested scope string
pub const ENV_SCOPE: &str = "KEYCLOAK_SCOPE";

/// Environment variable: HTTP listen port
pub const ENV_PORT: &str = "PORT";

/// Default identity provider base URL
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/realms/demo";

/// Default redirect URI for the callback leg
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";

/// Default post-logout redirect URI
pub const DEFAULT_LOGOUT_REDIRECT_URI: &str = "http://localhost:3000/logout-success";

/// Default requested scope
pub const DEFAULT_SCOPE: &str = "openid profile email";

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default HTTP bind host
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

// ============================================================================
// IDENTITY PROVIDER PATHS (Keycloak OpenID Connect layout)
// ============================================================================

/// Authorization endpoint path under the realm URL
pub const PROVIDER_AUTH_PATH: &str = "/protocol/openid-connect/auth";

/// Token endpoint path under the realm URL
pub const PROVIDER_TOKEN_PATH: &str = "/protocol/openid-connect/token";

/// Userinfo endpoint path under the realm URL
pub const PROVIDER_USERINFO_PATH: &str = "/protocol/openid-connect/userinfo";

/// Logout endpoint path under the realm URL
pub const PROVIDER_LOGOUT_PATH: &str = "/protocol/openid-connect/logout";

// ============================================================================
// SESSIONS
// ============================================================================

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "sessionId";

/// Session cookie lifetime in seconds (24 hours)
pub const SESSION_COOKIE_MAX_AGE_SECS: u64 = 86_400;

/// Session identifier used when neither a cookie nor a header supplies one
pub const FALLBACK_SESSION_ID: &str = "default";

// ============================================================================
// HTTP & API
// ============================================================================

/// Server name reported in the status payload
pub const SERVER_NAME: &str = "authflow";

/// Redirect target after a successful callback leg
pub const AUTH_SUCCESS_REDIRECT: &str = "/?auth=success";

/// Local path of the logout confirmation page
pub const LOGOUT_SUCCESS_PATH: &str = "/logout-success";

/// Error code: callback reached without an authorization code
pub const ERROR_NO_AUTH_CODE: &str = "no_auth_code";

/// Error code: token exchange failed (transport error or non-2xx)
pub const ERROR_AUTH_FAILED: &str = "auth_failed";

/// Timeout in seconds for outbound calls to the identity provider
pub const HTTP_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// LOGGING
// ============================================================================

/// Number of recent log events kept for the dashboard
pub const LOG_BUFFER_CAPACITY: usize = 50;

/// Broadcast channel capacity for live log subscribers
pub const LOG_CHANNEL_CAPACITY: usize = 100;
