//! Online/Offline bar chart.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
};

use crate::dashboard::StatusSummary;
use crate::ui::theme::{OFFLINE, ONLINE};

pub fn draw_status_chart(f: &mut ratatui::Frame<'_>, area: Rect, s: StatusSummary) {
    let colors = [ONLINE, OFFLINE];
    let bars: Vec<Bar> = s
        .chart_series()
        .iter()
        .zip(colors)
        .map(|(&(label, value), color)| {
            Bar::default()
                .value(value)
                .label(Line::from(label))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
        })
        .collect();

    // two bars sharing the inner width, with a gap between them
    let inner_w = area.width.saturating_sub(2);
    let bar_width = (inner_w.saturating_sub(3) / 2).clamp(1, 12);

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Device Status"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(3);
    f.render_widget(chart, area);
}
