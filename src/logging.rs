//! Log threshold for the activity log and the headless console
//!
//! `RUST_LOG` is read once when a session starts. A bare level (`debug`)
//! applies to everything; a `crisistruth=<level>` directive takes precedence
//! over it. Directives for other targets are ignored.

use std::env;

/// Directive target that addresses this binary.
const LOG_TARGET: &str = "crisistruth";

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[strum(to_string = "warn", serialize = "warning")]
    Warn,
    Error,
}

/// Minimum level an event needs to be shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LogThreshold(LogLevel);

impl Default for LogThreshold {
    fn default() -> Self {
        Self(LogLevel::Info)
    }
}

impl LogThreshold {
    pub fn new(level: LogLevel) -> Self {
        Self(level)
    }

    /// Resolves the threshold from `RUST_LOG`, defaulting to `info`.
    pub fn from_env() -> Self {
        env::var("RUST_LOG")
            .map(|directives| Self::from_directives(&directives))
            .unwrap_or_default()
    }

    /// Parses a comma-separated `RUST_LOG` value. Unparseable levels are skipped.
    pub fn from_directives(directives: &str) -> Self {
        let mut global = None;
        let mut targeted = None;

        for directive in directives.split(',').map(str::trim) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    let target = target.trim();
                    let ours = target == LOG_TARGET
                        || target.starts_with(&format!("{}::", LOG_TARGET));
                    if ours {
                        if let Ok(level) = level.trim().parse() {
                            targeted = Some(level);
                        }
                    }
                }
                None => {
                    if let Ok(level) = directive.parse() {
                        global = Some(level);
                    }
                }
            }
        }

        targeted.or(global).map(Self::new).unwrap_or_default()
    }

    pub fn level(&self) -> LogLevel {
        self.0
    }

    pub fn allows(&self, level: LogLevel) -> bool {
        level >= self.0
    }
}
