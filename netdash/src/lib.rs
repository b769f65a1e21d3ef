//! netdash: terminal dashboard for network device status served by a REST scanner backend.

pub mod api;
pub mod app;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod login;
pub mod profiles;
pub mod session;
pub mod types;
pub mod ui;

pub use api::{ApiClient, DeviceApi, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorKind};
pub use session::Session;
