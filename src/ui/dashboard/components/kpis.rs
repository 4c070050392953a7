//! KPI cards
//!
//! One card per headline counter

use super::super::state::DashboardState;
use crate::projection::{KpiCard, KpiKind, ProjectedDashboard};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the row of KPI cards.
pub fn render_kpis(f: &mut Frame, area: Rect, state: &DashboardState, dashboard: &ProjectedDashboard) {
    let constraints = vec![Constraint::Ratio(1, dashboard.kpis.len().max(1) as u32); dashboard.kpis.len()];
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, chunk) in dashboard.kpis.iter().zip(chunks.iter()) {
        render_card(f, *chunk, state, card);
    }
}

fn render_card(f: &mut Frame, area: Rect, state: &DashboardState, card: &KpiCard) {
    let theme = &state.theme;
    let value_color = kpi_color(state, card.kind);

    let lines = vec![
        Line::from(Span::styled(
            card.formatted.clone(),
            Style::default()
                .fg(value_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.label.to_uppercase(), theme.muted_style())),
    ];

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(value_color)),
    );
    f.render_widget(widget, area);
}

fn kpi_color(state: &DashboardState, kind: KpiKind) -> Color {
    let theme = &state.theme;
    match kind {
        KpiKind::Scanned => theme.accent,
        KpiKind::Deceptions => theme.danger,
        KpiKind::Verified => theme.ok,
        KpiKind::Monitors => theme.warning,
    }
}
