//! Dashboard view model
//!
//! Owns the latest snapshot and the Loading/Ready state machine. A fetch
//! failure never produces an error state: before the first success the view
//! stays Loading, afterwards it keeps showing the last good snapshot.

use crate::consts::cli_consts::OUTCOME_QUEUE_SIZE;
use crate::projection::{self, DashboardView};
use crate::snapshot::DashboardSnapshot;
use crate::stats::StatsSource;
use crate::stats::error::StatsError;
use crate::stats::error_handler::ErrorHandler;
use crate::variant::DashboardVariant;
use crate::workers::{EventSender, FetchOutcome, RefreshHandle, spawn_refresh_loop};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ViewState {
    Loading,
    Ready,
}

/// What applying a fetch result did to the view model.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    /// First successful fetch: Loading -> Ready.
    EnteredReady,
    /// A newer snapshot replaced the previous one.
    Refreshed,
    /// Fetch failed before any snapshot arrived.
    StillLoading,
    /// Fetch failed; the previous snapshot is kept.
    KeptStale,
}

#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    variant: DashboardVariant,
    snapshot: Option<DashboardSnapshot>,
    is_loading: bool,
    last_success_at: Option<DateTime<Local>>,
    last_error: Option<String>,
    consecutive_failures: u32,
    refreshes: u64,
    error_handler: ErrorHandler,
}

impl DashboardViewModel {
    pub fn new(variant: DashboardVariant) -> Self {
        Self {
            variant,
            snapshot: None,
            is_loading: false,
            last_success_at: None,
            last_error: None,
            consecutive_failures: 0,
            refreshes: 0,
            error_handler: ErrorHandler::new(),
        }
    }

    /// Starts the recurring refresh against `source`. The returned handle owns
    /// the schedule; results arrive on the receiver and are fed to [`apply`].
    ///
    /// [`apply`]: DashboardViewModel::apply
    pub fn initialize(
        &mut self,
        source: Arc<dyn StatsSource>,
        period: Duration,
        events: EventSender,
    ) -> (RefreshHandle, mpsc::Receiver<FetchOutcome>) {
        let (outcome_sender, outcome_receiver) = mpsc::channel(OUTCOME_QUEUE_SIZE);
        self.begin_fetch();
        let handle = spawn_refresh_loop(source, period, outcome_sender, events);
        (handle, outcome_receiver)
    }

    pub fn begin_fetch(&mut self) {
        self.is_loading = true;
    }

    /// Applies one fetch result. A success replaces the snapshot wholesale.
    pub fn apply(&mut self, result: Result<DashboardSnapshot, StatsError>) -> Transition {
        self.is_loading = false;
        match result {
            Ok(snapshot) => {
                let was_ready = self.snapshot.is_some();
                self.snapshot = Some(snapshot);
                self.last_success_at = Some(Local::now());
                self.last_error = None;
                self.consecutive_failures = 0;
                self.refreshes += 1;
                if was_ready {
                    Transition::Refreshed
                } else {
                    Transition::EnteredReady
                }
            }
            Err(e) => {
                self.last_error = Some(self.error_handler.summarize(&e));
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                if self.snapshot.is_some() {
                    Transition::KeptStale
                } else {
                    Transition::StillLoading
                }
            }
        }
    }

    pub fn state(&self) -> ViewState {
        match self.snapshot {
            Some(_) => ViewState::Ready,
            None => ViewState::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Ready, but the most recent refresh failed.
    pub fn is_stale(&self) -> bool {
        self.snapshot.is_some() && self.consecutive_failures > 0
    }

    /// Age of the last good snapshot while stale.
    pub fn stale_age(&self, now: DateTime<Local>) -> Option<chrono::Duration> {
        if !self.is_stale() {
            return None;
        }
        self.last_success_at.map(|at| now - at)
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn variant(&self) -> DashboardVariant {
        self.variant
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    pub fn project(&self) -> DashboardView {
        projection::project(self.snapshot.as_ref(), self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Stats;
    use crate::stats::MockStatsSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn snapshot_with_total(total: u64) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: Some(Stats {
                total_scraped: Some(total),
                ..Stats::default()
            }),
            ..DashboardSnapshot::default()
        }
    }

    fn server_error() -> StatsError {
        StatsError::Http {
            status: 502,
            message: "bad gateway".to_string(),
        }
    }

    #[test]
    fn starts_loading_without_snapshot() {
        let model = DashboardViewModel::new(DashboardVariant::Classic);
        assert_eq!(model.state(), ViewState::Loading);
        assert_eq!(model.project(), DashboardView::Loading);
        assert!(!model.is_stale());
    }

    #[test]
    fn failure_before_first_success_stays_loading() {
        let mut model = DashboardViewModel::new(DashboardVariant::Classic);
        model.begin_fetch();
        assert_eq!(model.apply(Err(server_error())), Transition::StillLoading);
        assert_eq!(model.state(), ViewState::Loading);
        assert!(!model.is_loading());
        assert!(!model.is_stale());
        assert_eq!(model.last_error(), Some("Backend returned HTTP 502"));
    }

    #[test]
    fn later_success_replaces_snapshot_wholesale() {
        let mut model = DashboardViewModel::new(DashboardVariant::Console);
        model.apply(Ok(snapshot_with_total(5)));
        assert_eq!(model.apply(Ok(DashboardSnapshot::default())), Transition::Refreshed);
        assert_eq!(model.snapshot(), Some(&DashboardSnapshot::default()));
        assert_eq!(model.refreshes(), 2);
    }

    #[test]
    fn failure_after_ready_marks_stale_until_next_success() {
        let mut model = DashboardViewModel::new(DashboardVariant::Classic);
        model.apply(Ok(snapshot_with_total(7)));
        assert_eq!(model.apply(Err(server_error())), Transition::KeptStale);
        assert_eq!(model.apply(Err(server_error())), Transition::KeptStale);
        assert!(model.is_stale());
        assert_eq!(model.consecutive_failures(), 2);
        assert!(model.stale_age(Local::now()).is_some());

        model.apply(Ok(snapshot_with_total(8)));
        assert!(!model.is_stale());
        assert_eq!(model.last_error(), None);
        assert_eq!(model.stale_age(Local::now()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_enters_ready_once_and_survives_failed_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut source = MockStatsSource::new();
        source.expect_fetch_dashboard_stats().returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(snapshot_with_total(100))
            } else {
                Err(server_error())
            }
        });

        let (event_sender, _event_receiver) = mpsc::channel(64);
        let mut model = DashboardViewModel::new(DashboardVariant::Classic);
        let (mut handle, mut outcomes) = model.initialize(
            Arc::new(source),
            Duration::from_secs(30),
            EventSender::new(event_sender),
        );
        assert!(model.is_loading());
        assert_eq!(model.state(), ViewState::Loading);

        let mut transitions = Vec::new();
        for _ in 0..3 {
            let outcome = outcomes.recv().await.unwrap();
            transitions.push(model.apply(outcome.result));
        }
        handle.shutdown().await;

        let entered = transitions
            .iter()
            .filter(|t| **t == Transition::EnteredReady)
            .count();
        assert_eq!(entered, 1);
        assert_eq!(transitions[0], Transition::EnteredReady);
        assert_eq!(model.state(), ViewState::Ready);
        assert_eq!(model.snapshot(), Some(&snapshot_with_total(100)));
        assert!(model.is_stale());
    }
}
