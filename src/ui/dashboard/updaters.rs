//! Dashboard state update logic
//!
//! Applies fetch results, queued events and key-driven selection changes

use super::state::DashboardState;

use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use crate::projection::FeedKind;
use crate::view_model::Transition;
use crate::workers::FetchOutcome;

use std::time::{Duration, Instant};

impl DashboardState {
    /// Advance the animation tick and move queued events into the activity log.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }
    }

    /// Feed one fetch result to the view model and refresh the projection.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> Transition {
        let transition = self.view_model.apply(outcome.result);
        self.set_last_outcome_at(Instant::now());

        match transition {
            Transition::EnteredReady | Transition::Refreshed => {
                self.view = self.view_model.project();
                self.clamp_selection();
            }
            Transition::StillLoading | Transition::KeptStale => {}
        }

        if let Some(message) = Self::transition_message(transition, outcome.ticket) {
            self.add_to_activity_log(WorkerEvent::dashboard_with_level(
                message,
                EventType::StateChange,
                LogLevel::Info,
            ));
        }
        transition
    }

    /// Switch selection between the fake and real feeds.
    pub fn toggle_feed(&mut self) {
        let next = match self.active_feed() {
            FeedKind::Fake => FeedKind::Real,
            FeedKind::Real => FeedKind::Fake,
        };
        self.set_active_feed(next);
        self.set_selected(0);
    }

    pub fn select_next(&mut self) {
        let len = self.active_items().len();
        if len > 0 {
            self.set_selected((self.selected() + 1).min(len - 1));
        }
    }

    pub fn select_previous(&mut self) {
        self.set_selected(self.selected().saturating_sub(1));
    }

    /// Estimated time until the next scheduled refresh.
    pub fn next_refresh_in(&self) -> Duration {
        match self.last_outcome_at() {
            Some(at) => self.refresh_interval.saturating_sub(at.elapsed()),
            None => Duration::ZERO,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.active_items().len();
        if self.selected() >= len {
            self.set_selected(len.saturating_sub(1));
        }
    }

    fn transition_message(transition: Transition, ticket: u64) -> Option<String> {
        match transition {
            Transition::EnteredReady => Some(format!("Dashboard ready (snapshot #{})", ticket)),
            Transition::KeptStale => {
                Some("Showing last good snapshot until the next refresh".to_string())
            }
            Transition::Refreshed | Transition::StillLoading => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::logging::LogThreshold;
    use crate::projection::DashboardView;
    use crate::snapshot::DashboardSnapshot;
    use crate::stats::error::StatsError;
    use crate::variant::DashboardVariant;
    use crate::view_model::{DashboardViewModel, ViewState};
    use serde_json::json;

    fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            DashboardViewModel::new(DashboardVariant::Briefing),
            Duration::from_secs(30),
            LogThreshold::default(),
            false,
        )
    }

    fn outcome(ticket: u64, value: serde_json::Value) -> FetchOutcome {
        FetchOutcome {
            ticket,
            result: Ok(DashboardSnapshot::from_value(&value).unwrap()),
        }
    }

    fn failure(ticket: u64) -> FetchOutcome {
        FetchOutcome {
            ticket,
            result: Err(StatsError::Http {
                status: 500,
                message: String::new(),
            }),
        }
    }

    fn two_fake_items() -> serde_json::Value {
        json!({"trendingFake": [{"id": 1, "title": "a"}, {"id": 2, "title": "b"}]})
    }

    #[test]
    fn first_outcome_enters_ready_and_logs_it() {
        let mut state = state();
        assert_eq!(state.view, DashboardView::Loading);

        let transition = state.apply_outcome(outcome(1, two_fake_items()));
        assert_eq!(transition, Transition::EnteredReady);
        assert_eq!(state.view_model.state(), ViewState::Ready);
        assert!(matches!(state.view, DashboardView::Ready(_)));
        assert!(
            state
                .activity_logs
                .iter()
                .any(|event| event.msg.contains("Dashboard ready"))
        );
    }

    #[test]
    fn failure_keeps_projection() {
        let mut state = state();
        state.apply_outcome(outcome(1, two_fake_items()));
        let before = state.view.clone();

        assert_eq!(state.apply_outcome(failure(2)), Transition::KeptStale);
        assert_eq!(state.view, before);
        assert!(state.view_model.is_stale());
    }

    #[test]
    fn selection_moves_within_active_feed() {
        let mut state = state();
        state.apply_outcome(outcome(1, two_fake_items()));

        state.select_previous();
        assert_eq!(state.selected(), 0);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected(), 1);
        assert_eq!(state.selected_item().map(|item| item.title.as_str()), Some("b"));

        state.toggle_feed();
        assert_eq!(state.active_feed(), FeedKind::Real);
        assert_eq!(state.selected(), 0);
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn shorter_refresh_clamps_selection() {
        let mut state = state();
        state.apply_outcome(outcome(1, two_fake_items()));
        state.select_next();

        state.apply_outcome(outcome(2, json!({"trendingFake": [{"id": 9}]})));
        assert_eq!(state.selected(), 0);
        assert_eq!(
            state.selected_item().map(|item| item.title.as_str()),
            Some("Untitled Intelligence")
        );
    }

    #[test]
    fn update_drains_pending_events() {
        let mut state = state();
        state.add_event(WorkerEvent::fetcher_with_level(
            "Fetching".to_string(),
            EventType::Refresh,
            LogLevel::Debug,
        ));
        state.update();
        assert!(state.pending_events.is_empty());
        assert_eq!(state.activity_logs.len(), 1);
        assert_eq!(state.tick, 1);
    }
}
