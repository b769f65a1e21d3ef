//! Summary cards: Total / Online / Offline.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::dashboard::StatusSummary;
use crate::ui::theme::{ACCENT, OFFLINE, ONLINE};

pub fn draw_summary(f: &mut ratatui::Frame<'_>, area: Rect, s: StatusSummary) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    card(f, cols[0], "Total", s.total, ACCENT);
    card(f, cols[1], "Online", s.online, ONLINE);
    card(f, cols[2], "Offline", s.offline, OFFLINE);
}

fn card(f: &mut ratatui::Frame<'_>, area: Rect, label: &str, value: usize, color: Color) {
    let p = Paragraph::new(format!("{label}: {value}"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}
