//! Server-sent event stream for the dashboard log view
//!
//! Replays the buffered events so a fresh subscriber sees recent history,
//! then follows the broadcast channel. A subscriber that falls behind the
//! channel simply skips the lagged events; the stream itself stays open.

use crate::auth::FlowState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt, stream};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;

/// `GET /api/logs`: push stream of `{timestamp, message, type}` events
pub async fn logs_stream_handler(
    State(state): State<Arc<FlowState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    // Subscribe before snapshotting so an event emitted in between shows
    // up in the live tail instead of being dropped.
    let receiver = state.logs.subscribe();
    let backlog = state.logs.recent();
    let live = BroadcastStream::new(receiver).filter_map(|received| async move { received.ok() });

    let events = stream::iter(backlog)
        .chain(live)
        .map(|event| Event::default().json_data(&event))
        .filter_map(|serialized| async move { serialized.ok() })
        .map(Ok::<_, Infallible>);

    Sse::new(events).keep_alive(KeepAlive::default())
}
