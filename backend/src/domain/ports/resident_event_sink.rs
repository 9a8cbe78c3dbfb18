//! Port for store change notifications.
//!
//! The record store publishes one [`ResidentEvent`] after each successful
//! mutation; the display layer subscribes through this port and recomputes
//! its view from the new store state.

use std::sync::{Mutex, PoisonError};

use crate::domain::events::ResidentEvent;

/// Subscriber port for store mutations.
#[cfg_attr(test, mockall::automock)]
pub trait ResidentEventSink: Send + Sync {
    /// Receive one mutation notification.
    fn publish(&self, event: &ResidentEvent);
}

/// Sink that drops every event, for wiring without subscribers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpResidentEventSink;

impl ResidentEventSink for NoOpResidentEventSink {
    fn publish(&self, _event: &ResidentEvent) {}
}

/// Sink that records every event in order.
///
/// Doubles as the simplest possible subscriber and as a test observer.
#[derive(Debug, Default)]
pub struct RecordingResidentEventSink {
    events: Mutex<Vec<ResidentEvent>>,
}

impl RecordingResidentEventSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<ResidentEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<ResidentEvent> {
        std::mem::take(&mut self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ResidentEventSink for RecordingResidentEventSink {
    fn publish(&self, event: &ResidentEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
