//! Recurring dashboard refresh
//!
//! A scheduler task ticks at a fixed interval (first tick immediately) and
//! launches one fetch per tick. Fetches are not sequenced against each other:
//! each result is delivered as soon as it lands, so under uneven latency an
//! older response can arrive after a newer one. Cancelling the schedule stops
//! future ticks but leaves in-flight fetches alone; their results are dropped
//! once the receiving side has gone away.

use super::core::EventSender;
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::snapshot::DashboardSnapshot;
use crate::stats::StatsSource;
use crate::stats::error::StatsError;
use crate::stats::error_handler::ErrorHandler;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Result of one fetch, tagged with the tick that issued it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: u64,
    pub result: Result<DashboardSnapshot, StatsError>,
}

/// Owner of a running refresh schedule.
///
/// Dropping the handle cancels the schedule.
#[derive(Debug)]
pub struct RefreshHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Stops future ticks. Returns `true` only for the call that actually
    /// cancelled the schedule.
    pub fn cancel(&mut self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.token.cancel();
        true
    }

    /// Number of recurring schedules still alive (0 or 1).
    pub fn pending_schedules(&self) -> usize {
        match &self.task {
            Some(task) if !task.is_finished() => 1,
            _ => 0,
        }
    }

    /// Cancels the schedule and waits for the scheduler task to exit.
    pub async fn shutdown(&mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Starts the recurring refresh. Outcomes are delivered on `outcomes`.
pub fn spawn_refresh_loop(
    source: Arc<dyn StatsSource>,
    period: Duration,
    outcomes: mpsc::Sender<FetchOutcome>,
    events: EventSender,
) -> RefreshHandle {
    let token = CancellationToken::new();
    let cancelled = token.clone();

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticket: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => break,
                _ = ticker.tick() => {
                    ticket += 1;
                    tokio::spawn(fetch_once(
                        source.clone(),
                        ticket,
                        outcomes.clone(),
                        events.clone(),
                    ));
                    if ticket == 1 {
                        events
                            .send_scheduler_event(
                                format!("Refreshing every {} seconds", period.as_secs()),
                                EventType::Waiting,
                                LogLevel::Debug,
                            )
                            .await;
                    }
                }
            }
        }

        events
            .send_scheduler_event(
                "Refresh schedule cancelled".to_string(),
                EventType::StateChange,
                LogLevel::Debug,
            )
            .await;
    });

    RefreshHandle {
        token,
        task: Some(task),
    }
}

/// Performs a single fetch and reports it. Failures are logged and passed on
/// unchanged; there is no retry before the next tick.
pub async fn fetch_once(
    source: Arc<dyn StatsSource>,
    ticket: u64,
    outcomes: mpsc::Sender<FetchOutcome>,
    events: EventSender,
) {
    events
        .send_fetch_event(
            format!("Fetching dashboard statistics (#{})", ticket),
            EventType::Refresh,
            LogLevel::Debug,
        )
        .await;

    let result = source.fetch_dashboard_stats().await;
    match &result {
        Ok(_) => {
            events
                .send_fetch_event(
                    format!("Snapshot #{} received", ticket),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
        }
        Err(e) => {
            let handler = ErrorHandler::new();
            events
                .send_fetch_event(
                    format!("Refresh #{} failed: {}", ticket, e),
                    EventType::Error,
                    handler.classify_error(e),
                )
                .await;
        }
    }

    let _ = outcomes.send(FetchOutcome { ticket, result }).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::events::Event;
    use crate::stats::MockStatsSource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{Instant, sleep};

    /// Source whose fetches take a fixed (virtual) time to complete.
    struct DelayedSource {
        environment: Environment,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl StatsSource for DelayedSource {
        fn environment(&self) -> &Environment {
            &self.environment
        }

        async fn fetch_dashboard_stats(&self) -> Result<DashboardSnapshot, StatsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            sleep(self.delay).await;
            Ok(DashboardSnapshot::default())
        }
    }

    fn channels() -> (
        mpsc::Sender<FetchOutcome>,
        mpsc::Receiver<FetchOutcome>,
        EventSender,
        mpsc::Receiver<Event>,
    ) {
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(64);
        (outcome_tx, outcome_rx, EventSender::new(event_tx), event_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn first_fetch_is_immediate_then_every_period() {
        let mut source = MockStatsSource::new();
        source
            .expect_fetch_dashboard_stats()
            .returning(|| Ok(DashboardSnapshot::default()));
        let (outcome_tx, mut outcome_rx, events, _event_rx) = channels();

        let start = Instant::now();
        let mut handle = spawn_refresh_loop(
            Arc::new(source),
            Duration::from_secs(30),
            outcome_tx,
            events,
        );

        let first = outcome_rx.recv().await.unwrap();
        assert_eq!(first.ticket, 1);
        assert!(start.elapsed() < Duration::from_secs(1));

        let second = outcome_rx.recv().await.unwrap();
        assert_eq!(second.ticket, 2);
        assert!(start.elapsed() >= Duration::from_secs(30));
        assert!(start.elapsed() < Duration::from_secs(31));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_reported_and_not_retried() {
        let mut source = MockStatsSource::new();
        source.expect_fetch_dashboard_stats().times(2).returning(|| {
            Err(StatsError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        });
        let (outcome_tx, mut outcome_rx, events, mut event_rx) = channels();

        let start = Instant::now();
        let mut handle = spawn_refresh_loop(
            Arc::new(source),
            Duration::from_secs(30),
            outcome_tx,
            events,
        );

        let first = outcome_rx.recv().await.unwrap();
        assert!(first.result.is_err());
        let second = outcome_rx.recv().await.unwrap();
        assert!(second.result.is_err());
        // The retry waited for the next tick.
        assert!(start.elapsed() >= Duration::from_secs(30));
        handle.shutdown().await;

        let mut saw_failure = false;
        while let Ok(event) = event_rx.try_recv() {
            if event.event_type == EventType::Error {
                assert_eq!(event.log_level, LogLevel::Warn);
                assert!(event.msg.contains("HTTP error with status 503"));
                saw_failure = true;
            }
        }
        assert!(saw_failure);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_before_first_response_leaves_no_schedule() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = DelayedSource {
            environment: Environment::Local,
            delay: Duration::from_secs(3600),
            calls: calls.clone(),
        };
        let (outcome_tx, outcome_rx, events, _event_rx) = channels();

        let mut handle = spawn_refresh_loop(
            Arc::new(source),
            Duration::from_secs(30),
            outcome_tx,
            events,
        );
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(handle.pending_schedules(), 1);

        assert!(handle.cancel());
        assert!(!handle.cancel());
        handle.shutdown().await;
        assert_eq!(handle.pending_schedules(), 0);

        // The UI is gone; the in-flight fetch completes into a closed channel.
        drop(outcome_rx);
        sleep(Duration::from_secs(4000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_response_can_land_after_a_newer_one() {
        struct AlternatingSource {
            environment: Environment,
            calls: AtomicUsize,
        }

        #[async_trait::async_trait]
        impl StatsSource for AlternatingSource {
            fn environment(&self) -> &Environment {
                &self.environment
            }

            async fn fetch_dashboard_stats(&self) -> Result<DashboardSnapshot, StatsError> {
                let call = self.calls.fetch_add(1, Ordering::SeqCst);
                // The first request stalls past the next tick.
                let delay = if call == 0 { 45 } else { 1 };
                sleep(Duration::from_secs(delay)).await;
                Ok(DashboardSnapshot::default())
            }
        }

        let source = AlternatingSource {
            environment: Environment::Local,
            calls: AtomicUsize::new(0),
        };
        let (outcome_tx, mut outcome_rx, events, _event_rx) = channels();
        let mut handle = spawn_refresh_loop(
            Arc::new(source),
            Duration::from_secs(30),
            outcome_tx,
            events,
        );

        let first_arrival = outcome_rx.recv().await.unwrap();
        let second_arrival = outcome_rx.recv().await.unwrap();
        assert_eq!(first_arrival.ticket, 2);
        assert_eq!(second_arrival.ticket, 1);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn dropping_handle_cancels_schedule() {
        let mut source = MockStatsSource::new();
        source
            .expect_fetch_dashboard_stats()
            .returning(|| Ok(DashboardSnapshot::default()));
        let (outcome_tx, _outcome_rx, events, _event_rx) = channels();

        let handle = spawn_refresh_loop(
            Arc::new(source),
            Duration::from_secs(30),
            outcome_tx,
            events,
        );
        let token = handle.token.clone();
        drop(handle);
        assert!(token.is_cancelled());
    }
}
