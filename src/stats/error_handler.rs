//! Error classification for statistics requests

use crate::logging::LogLevel;
use crate::stats::error::StatsError;

#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify error and determine appropriate log level
    pub fn classify_error(&self, error: &StatsError) -> LogLevel {
        match error {
            // Rate limiting - low priority
            StatsError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Server errors - temporary issues
            StatsError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            StatsError::Http { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }

            // Backend is talking, but not the expected payload
            StatsError::Malformed(_) => LogLevel::Error,

            // Network issues - usually temporary
            StatsError::Reqwest(_) => LogLevel::Warn,

            StatsError::Http { .. } => LogLevel::Warn,
        }
    }

    /// Short, user-facing description of a failure.
    pub fn summarize(&self, error: &StatsError) -> String {
        match error {
            StatsError::Reqwest(e) if e.is_timeout() => "Request timed out".to_string(),
            StatsError::Reqwest(e) if e.is_connect() => "Backend unreachable".to_string(),
            StatsError::Reqwest(_) => "Network error".to_string(),
            StatsError::Http { status, .. } => format!("Backend returned HTTP {}", status),
            StatsError::Malformed(e) => e.to_string(),
        }
    }
}
