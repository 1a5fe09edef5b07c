//! Event log for the dashboard
//!
//! A bounded ring buffer of recent events plus a broadcast channel for live
//! subscribers. The flow handlers call [`LogBroadcaster::emit`]
//! fire-and-forget; nothing in the authentication flow waits on delivery or
//! depends on it for correctness.

use crate::constants::{LOG_BUFFER_CAPACITY, LOG_CHANNEL_CAPACITY};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::broadcast;

/// Severity of a dashboard log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
}

/// One dashboard log event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Serialized as `type` on the wire
    #[serde(rename = "type")]
    pub kind: LogKind,
}

/// Ring buffer plus broadcast fan-out for log events
pub struct LogBroadcaster {
    buffer: RwLock<VecDeque<LogEvent>>,
    sender: broadcast::Sender<LogEvent>,
    capacity: usize,
}

impl LogBroadcaster {
    /// Create a broadcaster with the default buffer capacity
    pub fn new() -> Self {
        Self::with_capacity(LOG_BUFFER_CAPACITY)
    }

    /// Create a broadcaster keeping at most `capacity` recent events
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(LOG_CHANNEL_CAPACITY);
        Self {
            buffer: RwLock::new(VecDeque::with_capacity(capacity)),
            sender,
            capacity,
        }
    }

    /// Record an event: buffer it, fan it out, and mirror it to tracing.
    pub fn emit(&self, kind: LogKind, message: impl Into<String>) {
        let event = LogEvent {
            timestamp: Utc::now(),
            message: message.into(),
            kind,
        };

        match kind {
            LogKind::Warning => tracing::warn!("{}", event.message),
            LogKind::Error => tracing::error!("{}", event.message),
            _ => tracing::info!("{}", event.message),
        }

        {
            let mut buffer = self.buffer.write();
            if buffer.len() == self.capacity {
                buffer.pop_front();
            }
            buffer.push_back(event.clone());
        }

        // Send to broadcast channel (ignore if no receivers)
        let _ = self.sender.send(event);
    }

    /// Snapshot of the buffered events, oldest first
    pub fn recent(&self) -> Vec<LogEvent> {
        self.buffer.read().iter().cloned().collect()
    }

    /// Subscribe to events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod logs_test;
