//! Placeholder shown until the first snapshot arrives

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render_loading(f: &mut Frame, area: Rect, state: &DashboardState) {
    let theme = &state.theme;
    let spinner = SPINNER[(state.tick / 2) % SPINNER.len()];

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} INITIALIZING INTELLIGENCE FEED {}", spinner, spinner),
            theme.title_style(),
        )),
        Line::from(Span::styled(
            format!("Connecting to {}", state.environment.api_url()),
            theme.muted_style(),
        )),
    ];
    if let Some(error) = state.view_model.last_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last attempt failed: {}. Retrying on the next refresh.", error),
            ratatui::prelude::Style::default().fg(theme.warning),
        )));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style()),
        );
    f.render_widget(widget, area);
}
