use super::*;
use axum::body::Body;
use axum::http::{Request, header};
use futures::StreamExt;
use tower::ServiceExt;

fn test_state() -> Arc<FlowState> {
    let config = Config {
        client_id: "demo-client".to_string(),
        client_secret: "demo-secret".to_string(),
        ..Config::default()
    };
    Arc::new(FlowState::new(config).unwrap())
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = build_router(test_state());

    let response = router.oneshot(get_request("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body.get("timestamp").is_some());
}

#[tokio::test]
async fn test_dashboard_serves_html_and_logs_the_visit() {
    let state = test_state();
    let router = build_router(state.clone());

    let response = router.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let events = state.logs.recent();
    assert!(events.iter().any(|e| e.message == "Dashboard loaded"));
}

#[tokio::test]
async fn test_logout_success_page() {
    let router = build_router(test_state());

    let response = router.oneshot(get_request("/logout-success")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("logged out"));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let router = build_router(test_state());

    let response = router.oneshot(get_request("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_flow_routes_are_mounted() {
    let router = build_router(test_state());

    let response = router.oneshot(get_request("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_log_stream_is_server_sent_events() {
    let state = test_state();
    state.logs.emit(LogKind::Info, "before subscribe");
    let router = build_router(state);

    // The body is an open stream; only the head is inspected here.
    let response = router.oneshot(get_request("/api/logs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );
}

#[tokio::test]
async fn test_log_stream_replays_buffered_events_in_order() {
    let state = test_state();
    state.logs.emit(LogKind::Info, "first buffered event");
    state.logs.emit(LogKind::Success, "second buffered event");
    let router = build_router(state);

    let response = router.oneshot(get_request("/api/logs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The stream never ends on its own; read frames until both buffered
    // events have been replayed, bounded by a timeout.
    let mut body = response.into_body().into_data_stream();
    let mut received = String::new();
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while received.matches("\n\n").count() < 2 {
            let chunk = body
                .next()
                .await
                .expect("stream ended before the backlog was replayed")
                .unwrap();
            received.push_str(std::str::from_utf8(&chunk).unwrap());
        }
    })
    .await
    .expect("buffered events were not replayed in time");

    let first = received.find("first buffered event").unwrap();
    let second = received.find("second buffered event").unwrap();
    assert!(first < second);
    assert!(received.contains("\"type\":\"info\""));
    assert!(received.contains("\"type\":\"success\""));
}

#[tokio::test]
async fn test_app_error_body_shape() {
    let error = AppError::from(AuthFlowError::config("bad address"));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "internal_server_error");
    assert!(body["message"].as_str().unwrap().contains("bad address"));
    assert!(body.get("timestamp").is_some());
}
