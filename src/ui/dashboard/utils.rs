//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::StatsFetcher => Color::Cyan,
        Worker::Scheduler => Color::Yellow,
        Worker::Dashboard => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Request timed out - waiting for next refresh".to_string();
    }
    if msg.contains("Reqwest error") {
        return "Network error - waiting for next refresh".to_string();
    }
    msg.to_string()
}

/// Human-readable age: `42s`, `3m 05s`, `2h 10m`.
pub fn format_age(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with `…`.
pub fn fit_width(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp() {
        assert_eq!(format_compact_timestamp("2025-03-09 14:05:33"), "03-09 14:05");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn ages() {
        assert_eq!(format_age(-3), "0s");
        assert_eq!(format_age(42), "42s");
        assert_eq!(format_age(185), "3m 05s");
        assert_eq!(format_age(7800), "2h 10m");
    }

    #[test]
    fn fits_width_on_char_boundaries() {
        assert_eq!(fit_width("short", 10), "short");
        assert_eq!(fit_width("ééééé", 3), "éé…");
    }

    #[test]
    fn cleans_network_errors() {
        assert_eq!(
            clean_http_error_message("Refresh #2 failed: Reqwest error: operation timed out"),
            "Request timed out - waiting for next refresh"
        );
        assert_eq!(clean_http_error_message("plain"), "plain");
    }
}
