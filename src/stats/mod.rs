use crate::environment::Environment;
use crate::snapshot::DashboardSnapshot;
use crate::stats::error::StatsError;

pub(crate) mod client;
pub use client::StatsClient;
pub mod error;
pub mod error_handler;

#[cfg(test)]
use mockall::automock;

/// Source of dashboard snapshots.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait StatsSource: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the current dashboard statistics.
    async fn fetch_dashboard_stats(&self) -> Result<DashboardSnapshot, StatsError>;
}
