//! One-shot command output
//!
//! `snapshot` and `config` report through here: one tagged line per message,
//! with errors going to stderr so `snapshot --json` output stays parseable.

use crate::ui::splash::LOGO_NAME;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Info => "INFO",
            Tone::Warn => "WARN",
            Tone::Error => "ERROR",
            Tone::Success => "SUCCESS",
        }
    }

    /// ANSI SGR parameters for the tag.
    fn sgr(self) -> &'static str {
        match self {
            Tone::Info => "1;33",
            Tone::Warn => "1;91",
            Tone::Error => "1;31",
            Tone::Success => "1;32",
        }
    }
}

/// Builds the coloured line. Empty details are left off.
pub fn format_message(tone: Tone, title: &str, details: &str) -> String {
    let mut line = format!("\x1b[{}m[{}]\x1b[0m {}", tone.sgr(), tone.tag(), title);
    if !details.is_empty() {
        let separator = if tone == Tone::Error { " - " } else { "\t " };
        line.push_str(separator);
        line.push_str(details);
    }
    line
}

pub fn print_message(tone: Tone, title: &str, details: &str) {
    let line = format_message(tone, title, details);
    match tone {
        Tone::Error => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

/// Banner shown when the backend cannot be reached at all.
pub fn print_friendly_error_header(api_url: &str) {
    // Same red as the splash logo.
    eprintln!("\x1b[38;2;239;68;68m{}\x1b[0m", LOGO_NAME);
    eprintln!(
        "Could not reach the CrisisTruth backend at {}. Check that it is running, or point the dashboard elsewhere with --api-url.\n",
        api_url
    );
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::Tone::Info,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::Tone::Warn,
            $title,
            &format!($($details)*),
        )
    };
}

/// Errors go to stderr; details are optional.
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tone::Error, $title, "")
    };
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::Tone::Error,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::Tone::Success,
            $title,
            &format!($($details)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_title_and_appends_details() {
        let line = format_message(Tone::Success, "Configuration saved", "/tmp/config.json");
        assert_eq!(
            line,
            "\x1b[1;32m[SUCCESS]\x1b[0m Configuration saved\t /tmp/config.json"
        );
    }

    #[test]
    fn empty_details_are_omitted() {
        let line = format_message(Tone::Warn, "Nothing to save", "");
        assert!(line.ends_with("[WARN]\x1b[0m Nothing to save"));
    }

    #[test]
    fn error_details_share_the_line() {
        let line = format_message(Tone::Error, "Failed to fetch", "Backend returned HTTP 500");
        assert!(line.contains("[ERROR]"));
        assert!(line.ends_with("Failed to fetch - Backend returned HTTP 500"));
    }
}
