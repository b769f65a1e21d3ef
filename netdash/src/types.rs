//! Types that mirror the backend's JSON schema.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
    // anything else the backend might send; counted as offline
    #[default]
    #[serde(other)]
    Unknown,
}

impl DeviceStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeviceStatus::Online => "Online",
            DeviceStatus::Offline => "Offline",
            DeviceStatus::Unknown => "Unknown",
        }
    }
}

/// A measurement the backend reports either as a raw number or as
/// preformatted text ("12.5 ms", "1.20 MB/s", "N/A", "-").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // whole numbers print without a trailing ".0"
            Reading::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Reading::Number(n) => write!(f, "{n:.2}"),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub ip: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub response_time: Option<Reading>,
    #[serde(default)]
    pub bandwidth_in: Option<Reading>,
    #[serde(default)]
    pub bandwidth_out: Option<Reading>,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.status == DeviceStatus::Online
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_accepts_numbers_text_and_nulls() {
        let json = r#"[
            {"ip":"10.0.0.2","hostname":"nas","status":"Online","response_time":3,"bandwidth_in":1024.5,"bandwidth_out":0},
            {"ip":"10.0.0.3","hostname":null,"status":"Offline","response_time":null,"bandwidth_in":"-","bandwidth_out":"-"},
            {"ip":"10.0.0.4","status":"Sleeping"}
        ]"#;
        let devices: Vec<Device> = serde_json::from_str(json).unwrap();
        assert_eq!(devices.len(), 3);

        assert!(devices[0].is_online());
        assert_eq!(devices[0].response_time, Some(Reading::Number(3.0)));
        assert_eq!(devices[0].bandwidth_in.as_ref().unwrap().to_string(), "1024.50");

        assert_eq!(devices[1].hostname, None);
        assert_eq!(devices[1].response_time, None);
        assert_eq!(devices[1].bandwidth_in, Some(Reading::Text("-".into())));

        assert_eq!(devices[2].status, DeviceStatus::Unknown);
        assert!(!devices[2].is_online());
        assert_eq!(devices[2].bandwidth_out, None);
    }

    #[test]
    fn reading_display() {
        assert_eq!(Reading::Number(12.0).to_string(), "12");
        assert_eq!(Reading::Number(0.25).to_string(), "0.25");
        assert_eq!(Reading::Text("1.20 MB/s".into()).to_string(), "1.20 MB/s");
    }

    #[test]
    fn login_request_shape() {
        let body = serde_json::to_value(LoginRequest {
            username: "admin",
            password: "admin123",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"username":"admin","password":"admin123"}));
    }
}
