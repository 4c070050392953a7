//! Dashboard state management
//!
//! Contains the main dashboard state struct and its selection model

use super::theme::Theme;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::logging::LogThreshold;
use crate::projection::{DashboardView, FeedKind, ProjectedItem};
use crate::view_model::DashboardViewModel;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Dashboard state: the view model plus everything the TUI needs on top of it.
#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard is polling.
    pub environment: Environment,
    /// Snapshot ownership and the Loading/Ready state machine.
    pub view_model: DashboardViewModel,
    /// Cached projection of the current snapshot.
    pub view: DashboardView,
    /// Colours and styles for the active variant.
    pub theme: Theme,
    /// Time between scheduled refreshes.
    pub refresh_interval: Duration,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Events below this level stay out of the log panel
    pub log_threshold: LogThreshold,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    /// Feed that receives selection keys.
    active_feed: FeedKind,
    /// Selected row in the active feed.
    selected: usize,
    /// When the last fetch result arrived.
    last_outcome_at: Option<Instant>,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(
        environment: Environment,
        view_model: DashboardViewModel,
        refresh_interval: Duration,
        log_threshold: LogThreshold,
        with_background_color: bool,
    ) -> Self {
        let theme = Theme::for_variant(view_model.variant());
        let view = view_model.project();
        Self {
            environment,
            view_model,
            view,
            theme,
            refresh_interval,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            log_threshold,
            with_background_color,
            tick: 0,
            active_feed: FeedKind::Fake,
            selected: 0,
            last_outcome_at: None,
        }
    }

    pub fn active_feed(&self) -> FeedKind {
        self.active_feed
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn last_outcome_at(&self) -> Option<Instant> {
        self.last_outcome_at
    }

    // Setters for private fields (for updaters)
    pub(super) fn set_active_feed(&mut self, feed: FeedKind) {
        self.active_feed = feed;
    }

    pub(super) fn set_selected(&mut self, selected: usize) {
        self.selected = selected;
    }

    pub(super) fn set_last_outcome_at(&mut self, at: Instant) {
        self.last_outcome_at = Some(at);
    }

    /// Items of the active feed, empty while loading.
    pub fn active_items(&self) -> &[ProjectedItem] {
        match &self.view {
            DashboardView::Ready(dashboard) => dashboard.feed(self.active_feed),
            DashboardView::Loading => &[],
        }
    }

    /// The highlighted item, if the active feed has any.
    pub fn selected_item(&self) -> Option<&ProjectedItem> {
        self.active_items().get(self.selected)
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
