//! Dashboard header component
//!
//! Renders the title, threat indicator and refresh gauge

use super::super::state::DashboardState;
use super::super::utils::format_age;
use crate::projection::DashboardView;

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title, threat level and time to next refresh.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let theme = &state.theme;
    let version = env!("CARGO_PKG_VERSION");
    let mut spans = vec![Span::styled(
        format!("CRISISTRUTH {} v{}", theme.variant.as_str().to_uppercase(), version),
        theme.title_style(),
    )];

    if let DashboardView::Ready(dashboard) = &state.view {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("THREAT LEVEL: {}", dashboard.threat.label),
            Style::default()
                .fg(theme.tone_color(dashboard.threat.tone))
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(age) = state.view_model.stale_age(Local::now()) {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("STALE ({} old)", format_age(age.num_seconds())),
            Style::default()
                .fg(Color::Black)
                .bg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick)
                .border_style(theme.border_style()),
        );
    f.render_widget(title, header_chunks[0]);

    // Gauge: spinner while the first snapshot is pending, countdown afterwards.
    let (progress_text, progress_percent) = if state.view_model.is_loading() {
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        ("LOADING - Fetching dashboard statistics".to_string(), progress)
    } else {
        let interval = state.refresh_interval.as_secs().max(1);
        let remaining = state.next_refresh_in().as_secs();
        let elapsed = interval.saturating_sub(remaining);
        let progress = ((elapsed as f64 / interval as f64) * 100.0) as u16;
        let label = match state.view_model.last_error() {
            Some(error) => format!("LAST REFRESH FAILED: {} - retry in {}s", error, remaining),
            None => format!("LIVE - next refresh in {}s", remaining),
        };
        (label, progress.min(100))
    };

    let gauge_color = if state.view_model.last_error().is_some() {
        theme.warning
    } else {
        theme.accent
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
