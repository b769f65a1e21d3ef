//! Login form state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::error::{ErrorKind, Result};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
    Quit,
}

#[derive(Debug, Default)]
pub struct LoginView {
    pub username: String,
    pub password: String,
    pub focus: Field,
    alert: Option<String>,
    submitting: bool,
}

impl LoginView {
    pub fn new(username: Option<String>) -> Self {
        let mut v = Self::default();
        if let Some(u) = username {
            v.username = u;
            v.focus = Field::Password;
        }
        v
    }

    /// Message of the blocking alert, if one is open.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return LoginAction::Quit;
        }
        // An open alert swallows everything until dismissed.
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return LoginAction::None;
        }
        if self.submitting {
            return if key.code == KeyCode::Esc {
                LoginAction::Quit
            } else {
                LoginAction::None
            };
        }
        match key.code {
            KeyCode::Esc => return LoginAction::Quit,
            KeyCode::Enter => {
                self.submitting = true;
                return LoginAction::Submit;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_mut().push(c);
            }
            _ => {}
        }
        LoginAction::None
    }

    /// Apply the outcome of a submitted login. On success the caller gets a
    /// session; on any failure the alert opens and the fields stay as typed.
    pub fn finish(&mut self, res: Result<String>) -> Option<Session> {
        self.submitting = false;
        match res {
            Ok(token) => {
                info!(username = %self.username, "login succeeded");
                Some(Session::new(token))
            }
            Err(e) => {
                warn!(username = %self.username, error = %e, "login failed");
                self.alert = Some(match e.kind() {
                    ErrorKind::Auth => "Invalid credentials".to_string(),
                    ErrorKind::Network => "Invalid credentials (backend unreachable)".to_string(),
                });
                None
            }
        }
    }

    /// The login request went away without an answer; unlock the form.
    pub fn abandon(&mut self) {
        self.submitting = false;
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }
}
