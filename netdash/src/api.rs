//! Minimal HTTP client for the scanner backend: login, device list, scan trigger.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::error::{is_auth_status, ApiError, Result};
use crate::session::Session;
use crate::types::{Device, LoginRequest, LoginResponse};

/// Backend address baked in at build time; CLI/profiles may override it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Exchange credentials for an access token.
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Fetch the full device list.
    async fn list_devices(&self, session: &Session) -> Result<Vec<Device>>;

    /// Ask the backend to rescan the network. The reply body is ignored.
    async fn trigger_scan(&self, session: &Session) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = parse_base_url(base_url)?;
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(format!("netdash/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|source| ApiError::InvalidBaseUrl {
            url: self.base.to_string(),
            source,
        })
    }
}

// Normalize so `join("devices")` appends instead of replacing the last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |source: url::ParseError| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    };
    let mut url = Url::parse(raw.trim()).map_err(invalid)?;
    if url.cannot_be_a_base() {
        return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// Map auth statuses first, then let reqwest turn any other non-2xx into an error.
fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if is_auth_status(status) {
        return Err(ApiError::Auth { status });
    }
    Ok(resp.error_for_status()?)
}

#[async_trait]
impl DeviceApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = self.endpoint("login")?;
        debug!(%url, username, "POST login");
        let resp = self
            .http
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let body: LoginResponse = check_status(resp)?.json().await?;
        Ok(body.access_token)
    }

    async fn list_devices(&self, session: &Session) -> Result<Vec<Device>> {
        let url = self.endpoint("devices")?;
        debug!(%url, "GET devices");
        let resp = self
            .http
            .get(url)
            .bearer_auth(session.token())
            .send()
            .await?;
        let devices: Vec<Device> = check_status(resp)?.json().await?;
        debug!(count = devices.len(), "devices received");
        Ok(devices)
    }

    async fn trigger_scan(&self, session: &Session) -> Result<()> {
        let url = self.endpoint("scan")?;
        debug!(%url, "GET scan");
        let resp = self
            .http
            .get(url)
            .bearer_auth(session.token())
            .send()
            .await?;
        check_status(resp)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let c = ApiClient::new("http://localhost:5000").unwrap();
        assert_eq!(c.endpoint("devices").unwrap().as_str(), "http://localhost:5000/devices");

        let c = ApiClient::new("http://gateway.lan/api").unwrap();
        assert_eq!(c.endpoint("scan").unwrap().as_str(), "http://gateway.lan/api/scan");
    }

    #[test]
    fn rejects_garbage_base_url() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "{err}");

        let err = ApiClient::new("mailto:admin@example.com").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "{err}");
    }
}
