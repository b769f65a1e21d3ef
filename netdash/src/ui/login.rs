//! Login form and the blocking "invalid credentials" alert.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::login::{Field, LoginView};
use crate::ui::theme::{ACCENT, OFFLINE};
use crate::ui::util::{centered_rect, mask};

pub fn draw_login(f: &mut ratatui::Frame<'_>, area: Rect, view: &LoginView, backend: &str) {
    let form = centered_rect(50, 12, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled(
            " Admin Login ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
    f.render_widget(block, form);

    let inner = Rect {
        x: form.x + 2,
        y: form.y + 1,
        width: form.width.saturating_sub(4),
        height: form.height.saturating_sub(2),
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // username
            Constraint::Length(3), // password
            Constraint::Length(1), // status / hint
            Constraint::Min(1),    // backend
        ])
        .split(inner);

    input(f, rows[0], "Username", &view.username, view.focus == Field::Username);
    input(f, rows[1], "Password", &mask(&view.password), view.focus == Field::Password);

    let hint = if view.is_submitting() {
        "Signing in..."
    } else {
        "Enter: login  Tab: next field  Esc: quit"
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(format!("backend: {backend}")).style(Style::default().fg(Color::DarkGray)),
        rows[3],
    );

    if let Some(msg) = view.alert() {
        draw_alert(f, area, msg);
    }
}

fn input(f: &mut ratatui::Frame<'_>, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let text = if focused { format!("{value}_") } else { value.to_string() };
    let p = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(label.to_string()),
    );
    f.render_widget(p, area);
}

fn draw_alert(f: &mut ratatui::Frame<'_>, area: Rect, msg: &str) {
    let popup = centered_rect(44, 5, area);
    f.render_widget(Clear, popup);
    let p = Paragraph::new(vec![
        Line::from(Span::styled(
            msg.to_string(),
            Style::default().fg(OFFLINE).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("press Enter to dismiss", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(OFFLINE))
            .title("Login failed"),
    );
    f.render_widget(p, popup);
}
