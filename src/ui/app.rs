//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use crate::opener::{UrlOpener, open_item_url};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::{FetchOutcome, RefreshHandle};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The live dashboard.
    Dashboard,
}

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Continue,
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard state; fetch results are applied even while the splash shows.
    dashboard: Box<DashboardState>,

    /// Receives events from the refresh workers.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Receives fetch results in arrival order.
    outcome_receiver: mpsc::Receiver<FetchOutcome>,

    /// Owns the recurring refresh; shut down when the UI exits.
    refresh_handle: RefreshHandle,

    /// Opens item links.
    opener: Box<dyn UrlOpener + Send>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        dashboard: DashboardState,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        outcome_receiver: mpsc::Receiver<FetchOutcome>,
        refresh_handle: RefreshHandle,
        opener: Box<dyn UrlOpener + Send>,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            dashboard: Box::new(dashboard),
            event_receiver,
            outcome_receiver,
            refresh_handle,
            opener,
        }
    }

    /// Moves every queued event and fetch result into the dashboard.
    fn drain_channels(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.dashboard.add_event(event);
        }
        while let Ok(outcome) = self.outcome_receiver.try_recv() {
            self.dashboard.apply_outcome(outcome);
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
            return KeyAction::Quit;
        }

        match self.current_screen {
            Screen::Splash => {
                // Any key press will skip the splash screen
                self.current_screen = Screen::Dashboard;
            }
            Screen::Dashboard => match code {
                KeyCode::Tab | KeyCode::BackTab => self.dashboard.toggle_feed(),
                KeyCode::Down | KeyCode::Char('j') => self.dashboard.select_next(),
                KeyCode::Up | KeyCode::Char('k') => self.dashboard.select_previous(),
                KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
                _ => {}
            },
        }
        KeyAction::Continue
    }

    fn open_selected(&mut self) {
        let Some(item) = self.dashboard.selected_item() else {
            return;
        };
        let (message, event_type, level) = match open_item_url(self.opener.as_ref(), item) {
            Ok(true) => (
                format!("Opened {}", item.url.as_deref().unwrap_or_default()),
                EventType::Success,
                LogLevel::Info,
            ),
            Ok(false) => (
                format!("\"{}\" has no link to open", item.title),
                EventType::Waiting,
                LogLevel::Info,
            ),
            Err(e) => (
                format!("Failed to open browser: {}", e),
                EventType::Error,
                LogLevel::Warn,
            ),
        };
        self.dashboard
            .add_event(WorkerEvent::dashboard_with_level(message, event_type, level));
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    let result = loop {
        app.drain_channels();
        app.dashboard.update();

        if let Err(e) = terminal.draw(|f| render(f, app.current_screen, &app.dashboard)) {
            break Err(e);
        }

        // Handle splash-to-dashboard transition
        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash_duration {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        match poll_key() {
            Ok(Some(code)) => {
                if app.handle_key(code) == KeyAction::Quit {
                    break Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => break Err(e),
        }

        // Let the refresh tasks make progress between frames.
        tokio::task::yield_now().await;
    };

    app.refresh_handle.shutdown().await;
    result
}

fn poll_key() -> std::io::Result<Option<KeyCode>> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // Skip events that are not KeyEventKind::Press
            if key.kind == event::KeyEventKind::Release {
                return Ok(None);
            }
            return Ok(Some(key.code));
        }
    }
    Ok(None)
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: Screen, dashboard: &DashboardState) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, dashboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::logging::LogThreshold;
    use crate::opener::MockUrlOpener;
    use crate::snapshot::DashboardSnapshot;
    use crate::stats::MockStatsSource;
    use crate::variant::DashboardVariant;
    use crate::view_model::DashboardViewModel;
    use crate::workers::EventSender;
    use mockall::predicate::eq;
    use serde_json::json;
    use std::sync::Arc;

    async fn app_with(opener: MockUrlOpener) -> App {
        let snapshot = DashboardSnapshot::from_value(&json!({
            "trendingFake": [
                {"id": 1, "title": "Linked", "url": "https://example.org/1"},
                {"id": 2, "title": "Unlinked"}
            ]
        }))
        .unwrap();
        let mut source = MockStatsSource::new();
        source
            .expect_fetch_dashboard_stats()
            .returning(move || Ok(snapshot.clone()));

        let (event_sender, event_receiver) = mpsc::channel(64);
        let mut view_model = DashboardViewModel::new(DashboardVariant::Classic);
        let (handle, mut outcome_receiver) = view_model.initialize(
            Arc::new(source),
            Duration::from_secs(30),
            EventSender::new(event_sender),
        );
        let mut dashboard = DashboardState::new(
            Environment::Local,
            view_model,
            Duration::from_secs(30),
            LogThreshold::default(),
            false,
        );
        let first = outcome_receiver.recv().await.unwrap();
        dashboard.apply_outcome(first);

        App::new(
            dashboard,
            event_receiver,
            outcome_receiver,
            handle,
            Box::new(opener),
        )
    }

    #[tokio::test]
    async fn any_key_leaves_splash_and_q_quits() {
        let mut app = app_with(MockUrlOpener::new()).await;
        assert_eq!(app.handle_key(KeyCode::Char('x')), KeyAction::Continue);
        assert_eq!(app.current_screen, Screen::Dashboard);
        assert_eq!(app.handle_key(KeyCode::Char('q')), KeyAction::Quit);
        app.refresh_handle.shutdown().await;
    }

    #[tokio::test]
    async fn enter_opens_selected_link_only_when_present() {
        let mut opener = MockUrlOpener::new();
        opener
            .expect_open()
            .with(eq("https://example.org/1"))
            .times(1)
            .returning(|_| Ok(()));
        let mut app = app_with(opener).await;
        app.current_screen = Screen::Dashboard;

        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('o'));
        app.dashboard.update();

        let messages: Vec<&str> = app
            .dashboard
            .activity_logs
            .iter()
            .map(|event| event.msg.as_str())
            .collect();
        assert!(messages.iter().any(|msg| msg.contains("Opened https://example.org/1")));
        assert!(messages.iter().any(|msg| msg.contains("has no link to open")));
        app.refresh_handle.shutdown().await;
    }
}
