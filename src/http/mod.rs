//! HTTP server for authflow
//!
//! Wires the flow routes, the dashboard pages, and the log stream into one
//! axum router. Static assets are embedded in the binary, so there is no
//! file system access at run time.

pub mod logstream;
pub mod session;

use crate::auth::{FlowState, create_flow_routes};
use crate::config::Config;
use crate::logs::LogKind;
use crate::{AuthFlowError, Result};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    LatencyUnit,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Catch-all error boundary for HTTP handlers.
///
/// Anything that escapes a handler becomes a generic 500 JSON body; the
/// full error goes to tracing only. Nothing here is fatal to the process.
#[derive(Debug)]
pub struct AppError(AuthFlowError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Unhandled error in request handler: {:?}", self.0);

        let body = json!({
            "error": "internal_server_error",
            "message": self.0.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<AuthFlowError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let state = Arc::new(FlowState::new(config)?);

    let app = build_router(state);

    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| AuthFlowError::config(format!("Invalid address {}: {}", addr, e)))?;

    tracing::info!("Starting HTTP server on {}", socket_addr);

    let listener = tokio::net::TcpListener::bind(socket_addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| AuthFlowError::config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Build the router with all endpoints
pub fn build_router(state: Arc<FlowState>) -> Router {
    let port = state.config.port;

    Router::new()
        .route("/", get(dashboard_handler))
        .route("/logout-success", get(logout_success_handler))
        .route("/api/logs", get(logstream::logs_stream_handler))
        .route("/healthz", get(health_handler))
        .with_state(state.clone())
        // The four flow legs
        .merge(create_flow_routes(state))
        .layer(
            ServiceBuilder::new()
                // Tracing layer for request/response logging
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new())
                        .on_response(
                            DefaultOnResponse::new()
                                .level(tracing::Level::INFO)
                                .latency_unit(LatencyUnit::Micros),
                        ),
                )
                // CORS layer scoped to the local dashboard origins
                .layer(cors_layer(port)),
        )
}

/// CORS policy for the dashboard: localhost origins on the configured port,
/// GET only, credentials allowed for the session cookie.
fn cors_layer(port: u16) -> CorsLayer {
    let origin_localhost = format!("http://localhost:{}", port)
        .parse::<axum::http::HeaderValue>()
        .expect("valid header value");
    let origin_127 = format!("http://127.0.0.1:{}", port)
        .parse::<axum::http::HeaderValue>()
        .expect("valid header value");

    CorsLayer::new()
        .allow_origin([origin_localhost, origin_127])
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

// ============================================================================
// PAGE & SYSTEM HANDLERS
// ============================================================================

/// Serve the embedded dashboard and note the visit in the event log
async fn dashboard_handler(
    axum::extract::State(state): axum::extract::State<Arc<FlowState>>,
) -> Html<&'static str> {
    state.logs.emit(LogKind::Info, "Dashboard loaded");
    Html(include_str!("../../static/index.html"))
}

/// Serve the embedded logout confirmation page
async fn logout_success_handler() -> Html<&'static str> {
    Html(include_str!("../../static/logout-success.html"))
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod http_test;
#[cfg(test)]
mod session_test;
