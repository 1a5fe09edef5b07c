//! Session state for the authorization-code flow
//!
//! The store is an explicit service object handed to the handlers through
//! shared state; it exclusively owns session lifetime. Entries have no
//! expiry and no capacity bound. Sessions live until logout or process
//! exit, which is the whole persistence story of this demo.

use crate::constants::{FALLBACK_SESSION_ID, SESSION_COOKIE_MAX_AGE_SECS, SESSION_COOKIE_NAME};
use axum::http::{HeaderMap, header};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// One browser's authentication state.
///
/// An entry is only written after a successful token exchange, so a stored
/// session always has `is_authenticated` set with the tokens the provider
/// returned; absence from the store is the unauthenticated state. Token
/// strings are opaque and nothing here parses or verifies them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Claims from the userinfo endpoint, attached best-effort. The claim
    /// set is provider-configuration-dependent, so it stays an untyped map.
    pub user_info: Option<Map<String, Value>>,
}

/// In-memory session store
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a session by id
    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().get(id).cloned()
    }

    /// Insert or replace the session stored under `id`
    pub fn put(&self, id: impl Into<String>, session: Session) {
        self.sessions.write().insert(id.into(), session);
    }

    /// Remove a session; removing a missing id is a no-op
    pub fn delete(&self, id: &str) {
        self.sessions.write().remove(id);
    }

    /// Number of stored sessions, exposed for diagnostics only
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the session identifier for a request.
///
/// Precedence, first match wins: the `sessionId` cookie, then the raw
/// `Authorization` header value, then the shared `"default"` fallback.
/// The header fallback conflates transport authentication with session
/// lookup and lets a client choose its own session key, a session
/// fixation hazard kept for compatibility with the integrations this
/// harness demonstrates against.
pub fn resolve_session_id(headers: &HeaderMap) -> String {
    if let Some(cookie_header) = headers.get(header::COOKIE)
        && let Ok(cookie_str) = cookie_header.to_str()
        && let Some(id) = cookie_str
            .split(';')
            .map(|c| c.trim())
            .find_map(|c| c.strip_prefix(SESSION_COOKIE_NAME)?.strip_prefix('='))
    {
        return id.to_string();
    }

    if let Some(auth_header) = headers.get(header::AUTHORIZATION)
        && let Ok(value) = auth_header.to_str()
    {
        return value.to_string();
    }

    FALLBACK_SESSION_ID.to_string()
}

/// Session cookie for a freshly established session: http-only, path `/`,
/// 24-hour max age.
pub fn set_session_cookie(session_id: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        SESSION_COOKIE_NAME, session_id, SESSION_COOKIE_MAX_AGE_SECS
    )
}

/// Clear the session cookie: same name, empty value, immediate expiry.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly", SESSION_COOKIE_NAME)
}

/// Generate an unguessable session identifier (using cryptographically secure RNG)
pub fn generate_session_id() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}
