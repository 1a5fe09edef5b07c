//! The four legs of the authorization-code flow
//!
//! Login builds the authorization redirect, callback exchanges the code and
//! establishes the session, status reports without mutating anything, and
//! logout tears the session down before handing the browser to the provider.
//! No state survives between legs beyond the session store entry; each
//! handler infers where the browser is in the flow from what the request and
//! the store contain.
//!
//! Known gap: the flow carries no OAuth `state` parameter, so the callback
//! redirect has no CSRF protection. That matches the integrations this
//! harness demonstrates against; do not rely on it outside a demo.

use crate::auth::client::OidcClient;
use crate::config::Config;
use crate::constants::{
    AUTH_SUCCESS_REDIRECT, ERROR_AUTH_FAILED, ERROR_NO_AUTH_CODE, FALLBACK_SESSION_ID,
    LOGOUT_SUCCESS_PATH, SERVER_NAME,
};
use crate::http::AppError;
use crate::http::session::{
    Session, SessionStore, clear_session_cookie, generate_session_id, resolve_session_id,
    set_session_cookie,
};
use crate::logs::{LogBroadcaster, LogKind};
use crate::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared state for the flow handlers
pub struct FlowState {
    pub config: Config,
    pub sessions: SessionStore,
    pub oidc: OidcClient,
    pub logs: Arc<LogBroadcaster>,
}

impl FlowState {
    /// Assemble the flow state from configuration
    pub fn new(config: Config) -> Result<Self> {
        let oidc = OidcClient::new(&config)?;
        Ok(Self {
            config,
            sessions: SessionStore::new(),
            oidc,
            logs: Arc::new(LogBroadcaster::new()),
        })
    }
}

/// Query parameters the provider sends to the callback leg
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
}

/// Create the four flow routes
pub fn create_flow_routes(state: Arc<FlowState>) -> Router {
    Router::new()
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
        .route("/logout", get(logout_handler))
        .route("/api/status", get(status_handler))
        .with_state(state)
}

/// 302 Found to `location`
fn redirect(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// 302 Found to `location`, carrying a `Set-Cookie` header
fn redirect_with_cookie(location: &str, cookie: String) -> Response {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, location.to_string()),
            (header::SET_COOKIE, cookie),
        ],
    )
        .into_response()
}

/// 302 back to the dashboard with an error code in the query string
fn error_redirect(code: &str) -> Response {
    redirect(&format!("/?error={}", urlencoding::encode(code)))
}

/// Leg A: redirect the browser to the provider's authorization endpoint.
///
/// Nothing is stored; the flow resumes when the provider redirects back to
/// the callback. Empty client credentials are not rejected here; they show
/// up later as a failed token exchange.
async fn login_handler(State(state): State<Arc<FlowState>>) -> Response {
    match state.oidc.authorize_url() {
        Ok(url) => {
            state
                .logs
                .emit(LogKind::Info, "Redirecting browser to the identity provider");
            redirect(&url)
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Leg B: exchange the authorization code and establish the session.
///
/// The session entry is written as soon as the token exchange succeeds; the
/// userinfo fetch afterwards is best-effort and only enriches the entry.
/// Any failure before that point leaves the store untouched and sends the
/// browser back to the dashboard with a generic error code.
async fn callback_handler(
    State(state): State<Arc<FlowState>>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    let mut session_id = resolve_session_id(&headers);
    if session_id == FALLBACK_SESSION_ID {
        // Never store tokens under the shared fallback key.
        session_id = generate_session_id();
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        state.logs.emit(
            LogKind::Error,
            "Callback reached without an authorization code",
        );
        return error_redirect(ERROR_NO_AUTH_CODE);
    };

    let tokens = match state.oidc.exchange_code(&code).await {
        Ok(tokens) => tokens,
        Err(e) => {
            // Upstream detail stays server-side; the browser only sees the code.
            tracing::error!("Token exchange failed: {e}");
            state.logs.emit(
                LogKind::Error,
                "Token exchange with the identity provider failed",
            );
            return error_redirect(ERROR_AUTH_FAILED);
        }
    };

    let access_token = tokens.access_token.clone();
    state.sessions.put(
        session_id.clone(),
        Session {
            is_authenticated: true,
            id_token: tokens.id_token,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user_info: None,
        },
    );
    state.logs.emit(
        LogKind::Success,
        "Authorization code exchanged; session established",
    );

    if let Some(token) = access_token.as_deref() {
        match state.oidc.fetch_userinfo(token).await {
            Ok(claims) => {
                if let Some(mut session) = state.sessions.get(&session_id) {
                    session.user_info = Some(claims);
                    state.sessions.put(session_id.clone(), session);
                }
                state
                    .logs
                    .emit(LogKind::Info, "User profile fetched from userinfo endpoint");
            }
            Err(e) => {
                tracing::warn!("Userinfo fetch failed: {e}");
                state.logs.emit(
                    LogKind::Warning,
                    "Userinfo fetch failed; continuing without profile claims",
                );
            }
        }
    }

    redirect_with_cookie(AUTH_SUCCESS_REDIRECT, set_session_cookie(&session_id))
}

/// Leg C: report authentication state without mutating anything.
///
/// An absent store entry reads as unauthenticated; the payload also carries
/// the diagnostics the dashboard renders (session count, recent log events).
async fn status_handler(State(state): State<Arc<FlowState>>, headers: HeaderMap) -> Json<Value> {
    let session_id = resolve_session_id(&headers);
    let session = state.sessions.get(&session_id).unwrap_or_default();

    let user = session
        .user_info
        .as_ref()
        .and_then(|claims| {
            claims
                .get("preferred_username")
                .or_else(|| claims.get("email"))
                .cloned()
        })
        .unwrap_or(Value::Null);

    Json(json!({
        "server": SERVER_NAME,
        "user": user,
        "userInfo": session.user_info,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "sessions": state.sessions.len(),
        "logs": state.logs.recent(),
        "sessionId": session_id,
    }))
}

/// Leg D: tear down the session and hand the browser to the provider.
///
/// The local entry is deleted before the redirect; there is no
/// confirmation that the provider actually terminated its side. Without an
/// authenticated session this is a straight redirect to the confirmation
/// page, no remote call.
async fn logout_handler(State(state): State<Arc<FlowState>>, headers: HeaderMap) -> Response {
    let session_id = resolve_session_id(&headers);

    match state.sessions.get(&session_id) {
        Some(session) if session.is_authenticated => {
            let url = match state.oidc.logout_url(session.id_token.as_deref()) {
                Ok(url) => url,
                Err(e) => return AppError::from(e).into_response(),
            };

            state.sessions.delete(&session_id);
            state.logs.emit(
                LogKind::Info,
                "Session terminated; redirecting to provider logout",
            );
            redirect_with_cookie(&url, clear_session_cookie())
        }
        _ => {
            state
                .logs
                .emit(LogKind::Info, "Logout requested with no active session");
            redirect(LOGOUT_SUCCESS_PATH)
        }
    }
}
