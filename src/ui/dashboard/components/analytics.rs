//! Category distribution and platform toxicity panels

use super::super::state::DashboardState;
use super::super::utils::fit_width;
use crate::projection::ProjectedDashboard;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph};

const LABEL_WIDTH: usize = 12;

pub fn render_analytics(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    dashboard: &ProjectedDashboard,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_categories(f, chunks[0], state, dashboard);
    render_toxicity(f, chunks[1], state, dashboard);
}

fn panel<'a>(title: &'a str, state: &DashboardState) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(state.theme.border_style())
        .title_style(state.theme.title_style())
}

fn render_categories(f: &mut Frame, area: Rect, state: &DashboardState, dashboard: &ProjectedDashboard) {
    let block = panel("CATEGORY DISTRIBUTION", state);
    if dashboard.categories.is_empty() {
        f.render_widget(
            Paragraph::new("No category data").style(state.theme.muted_style()).block(block),
            area,
        );
        return;
    }

    let bars: Vec<Bar> = dashboard
        .categories
        .iter()
        .map(|slice| {
            let color = state.theme.palette_color(slice.palette_index);
            Bar::default()
                .value(slice.share_percent.round() as u64)
                .label(Line::from(fit_width(&slice.name, LABEL_WIDTH)))
                .text_value(format!("{:.0}%", slice.share_percent))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(state.theme.background).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(100)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn render_toxicity(f: &mut Frame, area: Rect, state: &DashboardState, dashboard: &ProjectedDashboard) {
    let block = panel("PLATFORM TOXICITY", state);
    let max = dashboard
        .toxicity
        .iter()
        .map(|row| row.count)
        .max()
        .unwrap_or(0)
        .max(1);
    let bar_room = area.width.saturating_sub(LABEL_WIDTH as u16 + 12) as u64;

    let lines: Vec<Line> = if dashboard.toxicity.is_empty() {
        vec![Line::from(Span::styled("No toxicity data", state.theme.muted_style()))]
    } else {
        dashboard
            .toxicity
            .iter()
            .map(|row| {
                let filled = (u128::from(row.count) * u128::from(bar_room) / u128::from(max)) as usize;
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$} ", fit_width(&row.source, LABEL_WIDTH), width = LABEL_WIDTH),
                        state.theme.text_style(),
                    ),
                    Span::styled("█".repeat(filled), Style::default().fg(state.theme.danger)),
                    Span::styled(format!(" {}", row.count), state.theme.muted_style()),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
