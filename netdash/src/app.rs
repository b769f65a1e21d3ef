//! App state and main loop: login/dashboard screens, input handling, and drawing.

use std::{io, sync::Arc, time::Duration};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::api::DeviceApi;
use crate::dashboard::DashboardView;
use crate::error::Result;
use crate::login::{LoginAction, LoginView};
use crate::ui::{
    chart::draw_status_chart,
    devices::{devices_handle_key, draw_devices, visible_rows},
    header::draw_header,
    login::draw_login,
    summary::draw_summary,
};

const TICK: Duration = Duration::from_millis(100);

/// What the root shows: the login form until a session exists, then the dashboard.
pub enum Screen {
    Login(LoginView),
    Dashboard(DashboardView),
}

/// A login request running off the UI loop.
struct PendingLogin {
    handle: JoinHandle<()>,
    rx: oneshot::Receiver<Result<String>>,
}

pub struct App {
    api: Arc<dyn DeviceApi>,
    backend: String,
    screen: Screen,
    login: Option<PendingLogin>,
    should_quit: bool,
    // animation counter for the scan spinner
    tick: u64,
    last_table_area: Option<Rect>,
}

impl App {
    pub fn new(api: Arc<dyn DeviceApi>, backend: impl Into<String>, username: Option<String>) -> Self {
        Self {
            api,
            backend: backend.into(),
            screen: Screen::Login(LoginView::new(username)),
            login: None,
            should_quit: false,
            tick: 0,
            last_table_area: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown runs even when the loop failed
        self.shutdown();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => self.handle_key(k),
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            self.poll_login();
            if let Screen::Dashboard(d) = &mut self.screen {
                d.drain_events();
            }

            terminal.draw(|f| self.draw(f))?;
            self.tick = self.tick.wrapping_add(1);

            sleep(TICK).await;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        match &mut self.screen {
            Screen::Login(view) => match view.handle_key(k) {
                LoginAction::Quit => self.should_quit = true,
                LoginAction::Submit => self.start_login(),
                LoginAction::None => {}
            },
            Screen::Dashboard(d) => match k.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    d.scan();
                }
                _ => {
                    let page = self.last_table_area.map(visible_rows).unwrap_or(1);
                    let total = d.state().devices().len();
                    devices_handle_key(&mut d.scroll, k, total, page);
                }
            },
        }
        if self.should_quit {
            self.shutdown();
        }
    }

    fn login_pending(&self) -> bool {
        self.login.is_some()
    }

    fn start_login(&mut self) {
        let Screen::Login(view) = &self.screen else {
            return;
        };
        let api = self.api.clone();
        let username = view.username.clone();
        let password = view.password.clone();
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let _ = tx.send(api.login(&username, &password).await);
        });
        self.login = Some(PendingLogin { handle, rx });
    }

    /// Pick up a finished login, if any. On success the session is handed to
    /// a fresh dashboard, which starts polling right away.
    pub fn poll_login(&mut self) {
        let Some(pending) = self.login.as_mut() else {
            return;
        };
        let outcome = match pending.rx.try_recv() {
            Err(TryRecvError::Empty) => return,
            Ok(res) => Some(res),
            Err(TryRecvError::Closed) => None,
        };
        self.login = None;

        let Screen::Login(view) = &mut self.screen else {
            return;
        };
        let session = match outcome {
            Some(res) => view.finish(res),
            None => {
                warn!("login task ended without a result");
                view.abandon();
                None
            }
        };
        if let Some(session) = session {
            let mut dash = DashboardView::new(self.api.clone(), session);
            dash.activate();
            self.screen = Screen::Dashboard(dash);
        }
    }

    fn shutdown(&mut self) {
        if let Some(pending) = self.login.take() {
            pending.handle.abort();
        }
        if let Screen::Dashboard(d) = &mut self.screen {
            d.deactivate();
        }
        info!("shutting down");
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();
        let dash = match &self.screen {
            Screen::Login(view) => {
                draw_login(f, area, view, &self.backend);
                return;
            }
            Screen::Dashboard(d) => d,
        };

        // Root rows: header, summary cards, body
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // summary cards
                Constraint::Min(6),    // table (left) + chart (right)
            ])
            .split(area);

        draw_header(f, rows[0], dash, &self.backend, self.tick);

        let summary = dash.state().summary();
        draw_summary(f, rows[1], summary);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[2]);

        draw_devices(f, body[0], dash.state().devices(), dash.scroll);
        draw_status_chart(f, body[1], summary);

        // Cache for input handlers
        self.last_table_area = Some(body[0]);
    }
}
