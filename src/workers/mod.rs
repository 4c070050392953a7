pub mod core;
pub mod refresh;

pub use core::EventSender;
pub use refresh::{FetchOutcome, RefreshHandle, spawn_refresh_loop};
