//! Dashboard main renderer

use super::components::{analytics, feeds, footer, header, kpis, loading, logs};
use super::state::DashboardState;
use crate::projection::DashboardView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::Style;
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(state.theme.background)),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    match &state.view {
        DashboardView::Loading => loading::render_loading(f, main_chunks[1], state),
        DashboardView::Ready(dashboard) => {
            let body_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Fill(1)])
                .split(main_chunks[1]);
            kpis::render_kpis(f, body_chunks[0], state, dashboard);

            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
                .split(body_chunks[1]);
            analytics::render_analytics(f, content_chunks[0], state, dashboard);
            feeds::render_feeds(f, content_chunks[1], state, dashboard);
        }
    }

    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}
