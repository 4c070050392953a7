//! Session setup and initialization

use crate::config::Settings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::logging::LogThreshold;
use crate::stats::{StatsClient, StatsSource};
use crate::view_model::DashboardViewModel;
use crate::workers::{EventSender, FetchOutcome, RefreshHandle};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sender for events raised outside the refresh workers
    pub event_sender: EventSender,
    /// Fetch results, in arrival order
    pub outcome_receiver: mpsc::Receiver<FetchOutcome>,
    /// Owns the recurring refresh schedule
    pub refresh_handle: RefreshHandle,
    /// Snapshot ownership and state machine
    pub view_model: DashboardViewModel,
    /// The backend being polled
    pub environment: Environment,
    /// Time between refreshes
    pub refresh_interval: Duration,
    /// Minimum level of events shown to the user
    pub log_threshold: LogThreshold,
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the statistics client
/// 2. Sets up the event channel
/// 3. Resolves the log threshold from `RUST_LOG`
/// 4. Initializes the view model, which starts the refresh schedule
///
/// # Arguments
/// * `settings` - Resolved base URL, refresh interval and variant
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub fn setup_session(settings: Settings) -> Result<SessionData, Box<dyn Error>> {
    let client = StatsClient::new(settings.environment.clone())?;
    setup_session_with_source(Arc::new(client), settings, LogThreshold::from_env())
}

/// Same as [`setup_session`] with an explicit statistics source.
pub fn setup_session_with_source(
    source: Arc<dyn StatsSource>,
    settings: Settings,
    log_threshold: LogThreshold,
) -> Result<SessionData, Box<dyn Error>> {
    let (sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(sender);
    let mut view_model = DashboardViewModel::new(settings.variant);
    let (refresh_handle, outcome_receiver) =
        view_model.initialize(source, settings.refresh_interval, event_sender.clone());

    Ok(SessionData {
        event_receiver,
        event_sender,
        outcome_receiver,
        refresh_handle,
        view_model,
        environment: settings.environment,
        refresh_interval: settings.refresh_interval,
        log_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::snapshot::DashboardSnapshot;
    use crate::stats::MockStatsSource;
    use crate::variant::DashboardVariant;
    use crate::view_model::{Transition, ViewState};

    #[tokio::test]
    async fn session_starts_refreshing_immediately() {
        let mut source = MockStatsSource::new();
        source
            .expect_fetch_dashboard_stats()
            .returning(|| Ok(DashboardSnapshot::default()));
        let settings = Settings {
            environment: Environment::Local,
            refresh_interval: Duration::from_secs(30),
            variant: DashboardVariant::Console,
        };

        let mut session = setup_session_with_source(
            Arc::new(source),
            settings,
            LogThreshold::new(LogLevel::Debug),
        )
        .unwrap();
        assert!(session.view_model.is_loading());
        assert_eq!(session.log_threshold.level(), LogLevel::Debug);

        let outcome = session.outcome_receiver.recv().await.unwrap();
        assert_eq!(session.view_model.apply(outcome.result), Transition::EnteredReady);
        assert_eq!(session.view_model.state(), ViewState::Ready);
        assert_eq!(session.view_model.variant(), DashboardVariant::Console);

        session.refresh_handle.shutdown().await;
        assert_eq!(session.refresh_handle.pending_schedules(), 0);
    }
}
