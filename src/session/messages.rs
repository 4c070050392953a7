//! Unified messaging system for session operations

use crate::environment::Environment;
use crate::logging::LogThreshold;
use crate::variant::DashboardVariant;
use std::time::Duration;

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_WARN: &str = "\x1b[1;33m"; // Bold Yellow
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    /// Normal session start/shutdown messages
    Info(String),
    /// Success messages for completed operations
    Success(String),
    /// Degraded but still running
    Warn(String),
}

impl SessionMessage {
    /// Create an info message
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    /// Create a success message
    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn warn(msg: impl Into<String>) -> Self {
        Self::Warn(msg.into())
    }

    /// Render the message with its coloured tag
    pub fn render(&self) -> String {
        match self {
            Self::Info(msg) => format!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg),
            Self::Success(msg) => format!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg),
            Self::Warn(msg) => format!("{}[STALE]{} {}", COLOR_WARN, COLOR_RESET, msg),
        }
    }

    /// Print the message with appropriate formatting
    pub fn print(&self) {
        println!("{}", self.render());
    }
}

/// Print session startup message
pub fn print_session_starting(
    mode: &str,
    environment: &Environment,
    variant: DashboardVariant,
    refresh_interval: Duration,
    log_threshold: LogThreshold,
) {
    SessionMessage::info(format!(
        "Starting {} mode against {} ({} variant, refresh every {}s, log level {})",
        mode,
        environment.api_url(),
        variant,
        refresh_interval.as_secs(),
        log_threshold.level()
    ))
    .print();
}

/// Print session shutdown message
pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

/// Print session exit message
pub fn print_session_exit_success() {
    SessionMessage::success("CrisisTruth dashboard exited successfully").print();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_their_tag() {
        assert!(SessionMessage::info("hi").render().contains("[INFO]"));
        assert!(SessionMessage::success("ok").render().ends_with(" ok"));
        assert!(SessionMessage::warn("old").render().contains("[STALE]"));
    }
}
