//! Authenticated session context, handed explicitly to whoever talks to the backend.

use std::fmt;
use std::sync::Arc;

/// Bearer token issued by `/login`. Lives in memory only; dropped on exit.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: Arc<str>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let s = Session::new("abc123");
        assert_eq!(s.token(), "abc123");
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("abc123"), "{dbg}");
    }
}
