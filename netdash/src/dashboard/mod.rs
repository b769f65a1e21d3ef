//! Dashboard view: owns the device snapshot, the 30s poller and the scan action.

pub mod poller;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tracing::{debug, info};

use crate::api::DeviceApi;
use crate::session::Session;

pub use poller::{DashboardEvent, FetchOrigin, Fetcher, Poller};
pub use state::{DashboardState, StatusSummary};

pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

pub struct DashboardView {
    state: DashboardState,
    fetcher: Fetcher,
    events: UnboundedReceiver<DashboardEvent>,
    poller: Option<Poller>,
    poll_interval: Duration,
    pub scroll: usize,
}

impl DashboardView {
    pub fn new(api: Arc<dyn DeviceApi>, session: Session) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            state: DashboardState::new(),
            fetcher: Fetcher::new(api, session, tx),
            events,
            poller: None,
            poll_interval: POLL_INTERVAL,
            scroll: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.poller.is_some()
    }

    /// True while any `/devices` request is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.fetcher.in_flight() > 0
    }

    /// Start polling: one fetch right away, then every poll interval.
    pub fn activate(&mut self) {
        if self.poller.is_some() {
            return;
        }
        info!(interval_secs = self.poll_interval.as_secs(), "dashboard activated");
        self.poller = Some(Poller::start(self.fetcher.clone(), self.poll_interval));
    }

    /// Stop the timer. Safe to call more than once.
    pub fn deactivate(&mut self) {
        if self.poller.take().is_some() {
            info!("dashboard deactivated");
        }
    }

    /// Kick off scan + refetch. Busy is set before this returns and cleared
    /// when `ScanFinished` is processed. Ignored while a scan is running.
    pub fn scan(&mut self) -> bool {
        if !self.state.begin_scan() {
            debug!("scan already running; ignoring");
            return false;
        }
        info!("network scan requested");
        let fetcher = self.fetcher.clone();
        tokio::spawn(async move { fetcher.scan_then_fetch().await });
        true
    }

    pub fn handle_event(&mut self, ev: DashboardEvent) {
        match ev {
            DashboardEvent::Fetched {
                generation,
                origin,
                result,
            } => {
                debug!(generation, ?origin, ok = result.is_ok(), "fetch settled");
                self.state.apply(generation, result);
            }
            DashboardEvent::ScanFinished => {
                self.state.finish_scan();
                info!("network scan finished");
            }
        }
    }

    /// Apply everything that has arrived without waiting. Returns how many events were handled.
    pub fn drain_events(&mut self) -> usize {
        let mut n = 0;
        loop {
            match self.events.try_recv() {
                Ok(ev) => {
                    self.handle_event(ev);
                    n += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        n
    }

    /// Wait for the next event and apply it.
    pub async fn next_event(&mut self) {
        // the view holds a sender via its fetcher, so the channel never closes
        if let Some(ev) = self.events.recv().await {
            self.handle_event(ev);
        }
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.deactivate();
    }
}
