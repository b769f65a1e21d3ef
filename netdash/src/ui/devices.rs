//! Device table with status coloring, zebra striping and a scrollbar.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::types::{Device, DeviceStatus, Reading};
use crate::ui::theme::{ACCENT, OFFLINE, ONLINE, SB_ARROW, SB_THUMB, SB_TRACK, UNKNOWN};
use crate::ui::util::truncate_middle;

const COLS: [Constraint; 6] = [
    Constraint::Length(16),     // IP
    Constraint::Percentage(30), // Hostname
    Constraint::Length(8),      // Status
    Constraint::Length(14),     // Response time
    Constraint::Length(14),     // Bandwidth in
    Constraint::Length(14),     // Bandwidth out
];

fn reading(r: Option<&Reading>) -> String {
    r.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
}

fn status_color(s: DeviceStatus) -> Color {
    match s {
        DeviceStatus::Online => ONLINE,
        DeviceStatus::Offline => OFFLINE,
        DeviceStatus::Unknown => UNKNOWN,
    }
}

/// Rows visible in a table drawn into `area` (borders and header excluded).
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

pub fn draw_devices(f: &mut ratatui::Frame<'_>, area: Rect, devices: &[Device], scroll_offset: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Devices ({})", devices.len()));
    f.render_widget(block, area);

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height < 1 || inner.width < 3 {
        return;
    }
    // reserve 2 columns for the scrollbar
    let content = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    };

    let total_rows = devices.len();
    let viewport_rows = content.height.saturating_sub(1) as usize;
    let max_off = total_rows.saturating_sub(viewport_rows);
    let offset = scroll_offset.min(max_off);

    let rows = devices
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport_rows)
        .map(|(i, d)| {
            let zebra = if i % 2 == 1 {
                Style::default().bg(Color::Rgb(30, 30, 36))
            } else {
                Style::default()
            };
            let hostname = d.hostname.as_deref().unwrap_or("-");
            Row::new(vec![
                Cell::from(d.ip.clone()),
                Cell::from(truncate_middle(hostname, 40)),
                Cell::from(d.status.label())
                    .style(Style::default().fg(status_color(d.status)).add_modifier(Modifier::BOLD)),
                Cell::from(reading(d.response_time.as_ref())),
                Cell::from(reading(d.bandwidth_in.as_ref())),
                Cell::from(reading(d.bandwidth_out.as_ref())),
            ])
            .style(zebra)
        });

    let header = Row::new(vec![
        "IP",
        "Hostname",
        "Status",
        "Response Time",
        "Bandwidth In",
        "Bandwidth Out",
    ])
    .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, COLS.to_vec()).header(header).column_spacing(1);
    f.render_widget(table, content);

    if total_rows > viewport_rows {
        draw_scrollbar(f, inner, total_rows, viewport_rows, offset);
    }
}

fn draw_scrollbar(f: &mut ratatui::Frame<'_>, inner: Rect, total_rows: usize, viewport_rows: usize, offset: usize) {
    let scroll_area = Rect {
        x: inner.x + inner.width.saturating_sub(1),
        y: inner.y,
        width: 1,
        height: inner.height,
    };
    if scroll_area.height < 3 {
        return;
    }
    let track = (scroll_area.height - 2) as usize;
    let total = total_rows.max(1);
    let view = viewport_rows.clamp(1, total);
    let max_off = total.saturating_sub(view);

    let thumb_len = (track * view).div_ceil(total).max(1).min(track);
    let thumb_top = if max_off == 0 {
        0
    } else {
        ((track - thumb_len) * offset + max_off / 2) / max_off
    };

    let mut lines: Vec<Line> = Vec::with_capacity(scroll_area.height as usize);
    lines.push(Line::from(Span::styled("▲", Style::default().fg(SB_ARROW))));
    for i in 0..track {
        if i >= thumb_top && i < thumb_top + thumb_len {
            lines.push(Line::from(Span::styled("█", Style::default().fg(SB_THUMB))));
        } else {
            lines.push(Line::from(Span::styled("│", Style::default().fg(SB_TRACK))));
        }
    }
    lines.push(Line::from(Span::styled("▼", Style::default().fg(SB_ARROW))));
    f.render_widget(Paragraph::new(lines), scroll_area);
}

/// Keyboard scrolling (Up/Down/PageUp/PageDown/Home/End), clamped to the list.
pub fn devices_handle_key(scroll_offset: &mut usize, key: KeyEvent, total_rows: usize, page_size: usize) {
    let page = page_size.max(1);
    match key.code {
        KeyCode::Up => *scroll_offset = scroll_offset.saturating_sub(1),
        KeyCode::Down => *scroll_offset = scroll_offset.saturating_add(1),
        KeyCode::PageUp => *scroll_offset = scroll_offset.saturating_sub(page),
        KeyCode::PageDown => *scroll_offset = scroll_offset.saturating_add(page),
        KeyCode::Home => *scroll_offset = 0,
        KeyCode::End => *scroll_offset = usize::MAX,
        _ => {}
    }
    let max_off = total_rows.saturating_sub(page_size);
    *scroll_offset = (*scroll_offset).min(max_off);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn scroll_is_clamped() {
        let mut off = 0;
        devices_handle_key(&mut off, key(KeyCode::Up), 30, 10);
        assert_eq!(off, 0);
        devices_handle_key(&mut off, key(KeyCode::PageDown), 30, 10);
        assert_eq!(off, 10);
        devices_handle_key(&mut off, key(KeyCode::End), 30, 10);
        assert_eq!(off, 20);
        devices_handle_key(&mut off, key(KeyCode::Down), 30, 10);
        assert_eq!(off, 20);
        devices_handle_key(&mut off, key(KeyCode::Home), 30, 10);
        assert_eq!(off, 0);
    }

    #[test]
    fn no_scroll_when_everything_fits() {
        let mut off = 0;
        devices_handle_key(&mut off, key(KeyCode::PageDown), 3, 10);
        assert_eq!(off, 0);
    }

    #[test]
    fn missing_readings_render_as_dash() {
        assert_eq!(reading(None), "-");
        assert_eq!(reading(Some(&Reading::Number(4.0))), "4");
    }
}
