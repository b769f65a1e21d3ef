//! Fetch plumbing shared by the periodic poller and the scan action.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::api::DeviceApi;
use crate::error::Result;
use crate::session::Session;
use crate::types::Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Poll,
    Scan,
}

#[derive(Debug)]
pub enum DashboardEvent {
    Fetched {
        generation: u64,
        origin: FetchOrigin,
        result: Result<Vec<Device>>,
    },
    /// Sent once the scan and its follow-up fetch have both settled, whatever the outcome.
    ScanFinished,
}

/// Everything a background task needs to hit the backend and report back.
#[derive(Clone)]
pub struct Fetcher {
    api: Arc<dyn DeviceApi>,
    session: Session,
    generations: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
    tx: UnboundedSender<DashboardEvent>,
}

impl Fetcher {
    pub fn new(api: Arc<dyn DeviceApi>, session: Session, tx: UnboundedSender<DashboardEvent>) -> Self {
        Self {
            api,
            session,
            generations: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            tx,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Issue one `/devices` call. The generation is taken before the request
    /// goes out so results can be ordered by issue time, not arrival time.
    pub async fn fetch(&self, origin: FetchOrigin) {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        debug!(generation, ?origin, "fetching devices");
        let result = self.api.list_devices(&self.session).await;
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
        // receiver gone means the view was torn down; nothing to update
        let _ = self.tx.send(DashboardEvent::Fetched {
            generation,
            origin,
            result,
        });
    }

    /// Scan, then refetch, then always report completion.
    pub async fn scan_then_fetch(&self) {
        if let Err(e) = self.api.trigger_scan(&self.session).await {
            warn!(error = %e, "scan request failed");
        }
        self.fetch(FetchOrigin::Scan).await;
        let _ = self.tx.send(DashboardEvent::ScanFinished);
    }
}

/// Repeating timer that issues a fetch immediately and then once per period.
/// Each tick spawns its own fetch, so a slow backend can produce overlapping
/// requests; the generation guard sorts them out. Dropping the poller stops
/// the timer. Fetches already in flight are left to finish.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn start(fetcher: Fetcher, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let f = fetcher.clone();
                tokio::spawn(async move { f.fetch(FetchOrigin::Poll).await });
            }
        });
        Self { handle }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
