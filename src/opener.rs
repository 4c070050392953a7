//! Opening news item links in the system browser.

use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::projection::ProjectedItem;
use crate::workers::EventSender;
#[cfg(test)]
use mockall::automock;
use std::io;
use std::thread;

#[cfg_attr(test, automock)]
pub trait UrlOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Hands URLs to the platform's default handler.
///
/// The URL is passed to the OS as a single argument, never through a shell.
/// Each launch runs on its own thread, which waits for the launcher to exit;
/// a failed launch is reported to the activity log.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    events: EventSender,
}

impl SystemBrowser {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let url = url.to_string();
        let events = self.events.clone();
        thread::Builder::new()
            .name("url-opener".to_string())
            .spawn(move || {
                if let Err(e) = open::that(&url) {
                    events.try_send_event(Event::dashboard_with_level(
                        format!("Failed to open {}: {}", url, e),
                        EventType::Error,
                        LogLevel::Warn,
                    ));
                }
            })?;
        Ok(())
    }
}

/// Only absolute web links with a host are handed to the browser. Whitespace
/// and control characters are never part of a valid link.
fn is_openable(url: &str) -> bool {
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let lower = url.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme) && url.len() > scheme.len())
}

/// Opens the item's link. Returns `Ok(false)` when the item has nothing to open.
pub fn open_item_url(opener: &dyn UrlOpener, item: &ProjectedItem) -> io::Result<bool> {
    match item.url.as_deref().map(str::trim) {
        Some(url) if is_openable(url) => {
            opener.open(url)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
