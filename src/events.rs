//! Event System
//!
//! Activity events emitted by the refresh machinery and shown in the activity log

use crate::logging::{LogLevel, LogThreshold};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Issues requests against the statistics endpoint.
    StatsFetcher,
    /// Owns the recurring refresh schedule.
    Scheduler,
    /// The dashboard itself (state transitions, user actions).
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    StateChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn fetcher_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::StatsFetcher, msg, event_type, log_level)
    }

    pub fn scheduler_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Scheduler, msg, event_type, log_level)
    }

    pub fn dashboard_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Dashboard, msg, event_type, log_level)
    }

    /// Successes are always shown; everything else has to clear `threshold`.
    pub fn should_display(&self, threshold: LogThreshold) -> bool {
        self.event_type == EventType::Success || threshold.allows(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_events_always_display() {
        let event = Event::fetcher_with_level(
            "Snapshot received".to_string(),
            EventType::Success,
            LogLevel::Trace,
        );
        assert!(event.should_display(LogThreshold::new(LogLevel::Error)));
    }

    #[test]
    fn other_events_respect_threshold() {
        let event = Event::fetcher_with_level(
            "Fetching dashboard statistics (#3)".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        );
        assert!(event.should_display(LogThreshold::new(LogLevel::Debug)));
        assert!(!event.should_display(LogThreshold::default()));
    }

    #[test]
    fn display_includes_type_and_message() {
        let event = Event::scheduler_with_level(
            "Refresh scheduled".to_string(),
            EventType::Waiting,
            LogLevel::Info,
        );
        let text = event.to_string();
        assert!(text.starts_with("Waiting ["));
        assert!(text.ends_with("Refresh scheduled"));
    }
}
