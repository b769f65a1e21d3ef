//! Dashboard snapshot: last applied device list, derived counts, busy flag.

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
}

impl StatusSummary {
    pub fn from_devices(devices: &[Device]) -> Self {
        let online = devices.iter().filter(|d| d.is_online()).count();
        Self {
            total: devices.len(),
            online,
            offline: devices.len() - online,
        }
    }

    /// Bar chart data: Online first, then Offline.
    pub fn chart_series(&self) -> [(&'static str, u64); 2] {
        [("Online", self.online as u64), ("Offline", self.offline as u64)]
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    devices: Vec<Device>,
    // generation of the fetch whose result is currently displayed
    applied_generation: u64,
    // newest generation known to have failed
    failed_generation: u64,
    busy: bool,
    stale: bool,
    last_refresh: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_devices(&self.devices)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// True when a fetch issued after the displayed snapshot has failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    /// Returns false if a scan is already running.
    pub fn begin_scan(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish_scan(&mut self) {
        self.busy = false;
    }

    /// Apply a fetch result tagged with the generation it was issued under.
    /// Results from fetches issued before the displayed one are dropped, so a
    /// slow, superseded response can't overwrite a fresher snapshot.
    /// Returns true if the snapshot was replaced.
    pub fn apply(&mut self, generation: u64, result: Result<Vec<Device>>) -> bool {
        let superseded = generation <= self.applied_generation;
        match result {
            Ok(_) if superseded => {
                debug!(
                    generation,
                    applied = self.applied_generation,
                    "dropping superseded device list"
                );
                false
            }
            Ok(devices) => {
                debug!(generation, count = devices.len(), "snapshot replaced");
                self.devices = devices;
                self.applied_generation = generation;
                self.stale = generation < self.failed_generation;
                self.last_refresh = Some(Local::now());
                true
            }
            Err(e) => {
                warn!(generation, error = %e, "device fetch failed; keeping previous snapshot");
                self.failed_generation = self.failed_generation.max(generation);
                if !superseded {
                    self.stale = true;
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::types::DeviceStatus;
    use reqwest::StatusCode;

    fn dev(ip: &str, status: DeviceStatus) -> Device {
        Device {
            ip: ip.into(),
            hostname: None,
            status,
            response_time: None,
            bandwidth_in: None,
            bandwidth_out: None,
        }
    }

    fn auth_err() -> ApiError {
        ApiError::Auth {
            status: StatusCode::UNAUTHORIZED,
        }
    }

    #[test]
    fn counts_always_add_up() {
        let lists = [
            vec![],
            vec![dev("10.0.0.1", DeviceStatus::Online)],
            vec![
                dev("10.0.0.1", DeviceStatus::Offline),
                dev("10.0.0.2", DeviceStatus::Unknown),
            ],
            (0..20)
                .map(|i| {
                    let s = if i % 3 == 0 { DeviceStatus::Online } else { DeviceStatus::Offline };
                    dev(&format!("192.168.1.{i}"), s)
                })
                .collect(),
        ];
        for l in &lists {
            let s = StatusSummary::from_devices(l);
            assert_eq!(s.online + s.offline, l.len());
            assert_eq!(s.total, l.len());
        }
    }

    #[test]
    fn unknown_status_counts_as_offline() {
        let s = StatusSummary::from_devices(&[
            dev("a", DeviceStatus::Online),
            dev("b", DeviceStatus::Unknown),
        ]);
        assert_eq!((s.online, s.offline), (1, 1));
    }

    #[test]
    fn chart_first_series_is_zero_without_online_devices() {
        let s = StatusSummary::from_devices(&[
            dev("a", DeviceStatus::Offline),
            dev("b", DeviceStatus::Offline),
        ]);
        let series = s.chart_series();
        assert_eq!(series[0], ("Online", 0));
        assert_eq!(series[1], ("Offline", 2));
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let mut st = DashboardState::new();
        assert!(st.apply(1, Ok(vec![dev("10.0.0.2", DeviceStatus::Online)])));
        assert!(!st.is_stale());
        let refreshed = st.last_refresh();
        assert!(refreshed.is_some());

        assert!(!st.apply(2, Err(auth_err())));
        assert_eq!(st.devices().len(), 1);
        assert!(st.is_stale());
        assert_eq!(st.last_refresh(), refreshed);

        // next good fetch clears the marker
        assert!(st.apply(3, Ok(vec![])));
        assert!(!st.is_stale());
        assert!(st.devices().is_empty());
    }

    #[test]
    fn superseded_response_does_not_overwrite() {
        let mut st = DashboardState::new();
        // fetch 2 resolves first
        assert!(st.apply(2, Ok(vec![dev("new", DeviceStatus::Online)])));
        // fetch 1 was issued earlier but resolves later
        assert!(!st.apply(1, Ok(vec![dev("old", DeviceStatus::Offline)])));
        assert_eq!(st.devices()[0].ip, "new");

        // a late failure of an older fetch doesn't mark the newer snapshot stale
        assert!(!st.apply(1, Err(auth_err())));
        assert!(!st.is_stale());
    }

    #[test]
    fn older_success_after_newer_failure_stays_stale() {
        let mut st = DashboardState::new();
        assert!(!st.apply(2, Err(auth_err())));
        assert!(st.is_stale());

        // fetch 1 still beats the empty snapshot, but fetch 2 already failed
        assert!(st.apply(1, Ok(vec![dev("10.0.0.2", DeviceStatus::Online)])));
        assert_eq!(st.devices().len(), 1);
        assert!(st.is_stale());

        assert!(st.apply(3, Ok(vec![])));
        assert!(!st.is_stale());
    }

    #[test]
    fn snapshot_replaced_wholesale() {
        let mut st = DashboardState::new();
        st.apply(
            1,
            Ok(vec![dev("a", DeviceStatus::Online), dev("b", DeviceStatus::Online)]),
        );
        st.apply(2, Ok(vec![dev("c", DeviceStatus::Offline)]));
        let ips: Vec<_> = st.devices().iter().map(|d| d.ip.as_str()).collect();
        assert_eq!(ips, ["c"]);
    }

    #[test]
    fn scan_busy_flag() {
        let mut st = DashboardState::new();
        assert!(st.begin_scan());
        assert!(st.is_busy());
        assert!(!st.begin_scan(), "second scan while busy must be refused");
        st.finish_scan();
        assert!(!st.is_busy());
    }
}
