//! Top header: backend, refresh time, stale marker and scan spinner.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::dashboard::DashboardView;
use crate::ui::theme::{ACCENT, STALE};
use crate::ui::util::spinner;

pub fn header_line(view: &DashboardView, backend: &str, tick: u64) -> Line<'static> {
    let st = view.state();
    let refreshed = st
        .last_refresh()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".into());

    let mut spans = vec![
        Span::styled("netdash", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" | backend: {backend} | last refresh: {refreshed}")),
    ];
    if st.is_stale() {
        spans.push(Span::styled(
            "  ⚠ refresh failed, showing last good data",
            Style::default().fg(STALE),
        ));
    }
    if st.is_busy() {
        spans.push(Span::styled(
            format!("  {} scanning...", spinner(tick)),
            Style::default().fg(ACCENT),
        ));
    } else if view.is_fetching() {
        spans.push(Span::raw("  refreshing..."));
    }
    spans.push(Span::raw("  (s: scan, q: quit)"));
    Line::from(spans)
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView, backend: &str, tick: u64) {
    let title = header_line(view, backend, tick);
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
