//! Core worker utilities

use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event. A closed receiver means the dashboard is gone,
    /// and the event is dropped.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    /// Non-blocking variant for threads outside the runtime. Dropped if the
    /// queue is full.
    pub fn try_send_event(&self, event: Event) {
        let _ = self.sender.try_send(event);
    }

    pub async fn send_fetch_event(&self, message: String, event_type: EventType, log_level: LogLevel) {
        self.send_event(Event::fetcher_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_scheduler_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::scheduler_with_level(message, event_type, log_level))
            .await;
    }
}
