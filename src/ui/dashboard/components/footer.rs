//! Dashboard footer component
//!
//! Renders key bindings and the backend being polled

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer with key bindings.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = format!(
        "[Q] Quit | [Tab] Switch feed | [↑/↓] Select | [Enter/O] Open link | {}",
        state.environment.api_url()
    );

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(state.theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick)
                .border_style(state.theme.border_style()),
        );
    f.render_widget(footer, area);
}
