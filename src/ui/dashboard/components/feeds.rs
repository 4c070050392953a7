//! Trending fake and verified news feeds

use super::super::state::DashboardState;
use crate::projection::{FeedKind, ProjectedDashboard, ProjectedItem};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState};

pub fn render_feeds(f: &mut Frame, area: Rect, state: &DashboardState, dashboard: &ProjectedDashboard) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let variant = state.theme.variant;
    render_feed(f, chunks[0], state, dashboard, FeedKind::Fake, variant.fake_feed_title());
    render_feed(f, chunks[1], state, dashboard, FeedKind::Real, variant.real_feed_title());
}

fn render_feed(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    dashboard: &ProjectedDashboard,
    kind: FeedKind,
    title: &str,
) {
    let theme = &state.theme;
    let focused = state.active_feed() == kind;
    let score_color = match kind {
        FeedKind::Fake => theme.danger,
        FeedKind::Real => theme.ok,
    };
    let border_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        theme.border_style()
    };

    let items = dashboard.feed(kind);
    let list_items: Vec<ListItem> = if items.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No items reported",
            theme.muted_style(),
        )))]
    } else {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| feed_entry(state, item, index, score_color))
            .collect()
    };

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {} ({}) ", title, items.len()))
                .borders(Borders::ALL)
                .border_type(if focused {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(border_style)
                .title_style(theme.title_style()),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 48, 64))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if focused && !items.is_empty() {
        list_state.select(Some(state.selected()));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn feed_entry<'a>(
    state: &DashboardState,
    item: &'a ProjectedItem,
    index: usize,
    score_color: Color,
) -> ListItem<'a> {
    let theme = &state.theme;
    let rank = item.rank.map(|rank| rank as usize).unwrap_or(index + 1);

    let mut meta = vec![
        Span::styled(item.source.as_str(), theme.muted_style()),
        Span::raw(" · "),
        Span::styled(item.category.as_str(), theme.muted_style()),
    ];
    if let Some(region) = &item.region {
        meta.push(Span::raw(" · "));
        meta.push(Span::styled(region.as_str(), theme.muted_style()));
    }
    if item.url.is_some() {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            format!("[{}]", item.action_label),
            Style::default().fg(theme.accent),
        ));
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("#{} ", rank), theme.muted_style()),
            Span::styled(
                item.score_label.as_str(),
                Style::default()
                    .fg(score_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                item.title.as_str(),
                theme.text_style().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(item.summary.as_str(), theme.text_style())),
    ];
    if let Some(evidence) = item.evidence_line() {
        lines.push(Line::from(Span::styled(evidence, theme.muted_style())));
    }
    lines.push(Line::from(meta));
    lines.push(Line::from(""));
    ListItem::new(lines)
}
