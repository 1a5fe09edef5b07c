use super::*;

#[test]
fn test_emit_and_recent_order() {
    let logs = LogBroadcaster::new();
    logs.emit(LogKind::Info, "first");
    logs.emit(LogKind::Success, "second");

    let recent = logs.recent();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].message, "first");
    assert_eq!(recent[1].message, "second");
    assert_eq!(recent[1].kind, LogKind::Success);
}

#[test]
fn test_ring_buffer_evicts_oldest() {
    let logs = LogBroadcaster::with_capacity(3);
    for i in 0..5 {
        logs.emit(LogKind::Info, format!("event {i}"));
    }

    let recent = logs.recent();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].message, "event 2");
    assert_eq!(recent[2].message, "event 4");
}

#[test]
fn test_emit_without_subscribers_is_fine() {
    let logs = LogBroadcaster::new();
    // No receiver exists; emit must not fail or panic.
    logs.emit(LogKind::Error, "nobody listening");
    assert_eq!(logs.recent().len(), 1);
}

#[tokio::test]
async fn test_subscribe_receives_live_events() {
    let logs = LogBroadcaster::new();
    let mut rx = logs.subscribe();

    logs.emit(LogKind::Warning, "heads up");

    let event = rx.recv().await.unwrap();
    assert_eq!(event.message, "heads up");
    assert_eq!(event.kind, LogKind::Warning);
}

#[test]
fn test_event_wire_format() {
    let logs = LogBroadcaster::new();
    logs.emit(LogKind::Success, "logged in");

    let json = serde_json::to_value(&logs.recent()[0]).unwrap();
    // `kind` is renamed on the wire and severities are lowercase.
    assert_eq!(json.get("type").unwrap(), "success");
    assert!(json.get("kind").is_none());
    assert!(json.get("timestamp").is_some());
    assert_eq!(json.get("message").unwrap(), "logged in");
}
