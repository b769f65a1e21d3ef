//! Error taxonomy for backend calls.

use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Network,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Credentials rejected, or the bearer token is invalid/expired.
    #[error("authentication rejected (HTTP {status})")]
    Auth { status: StatusCode },

    /// Unreachable backend, non-2xx status, or a body we could not decode.
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid backend URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Auth { .. } => ErrorKind::Auth,
            ApiError::Network(_) | ApiError::InvalidBaseUrl { .. } => ErrorKind::Network,
        }
    }

    pub fn is_auth(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }
}

/// Statuses the backend uses for bad credentials and bad/expired tokens.
/// 422 is what a JWT layer answers for a malformed token.
pub fn is_auth_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::UNPROCESSABLE_ENTITY
    )
}

pub type Result<T> = std::result::Result<T, ApiError>;
