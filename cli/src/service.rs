//! Stand-in for the host service the console administers.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info};

const TICK: Duration = Duration::from_millis(25);

/// A recorded ban.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ban {
    /// `None` means permanent.
    pub minutes: Option<i64>,
    pub reason: Option<String>,
}

/// Mutable service state shared between the service and console threads.
#[derive(Debug, Default)]
pub struct ServiceState {
    pub online: BTreeSet<String>,
    pub bans: BTreeMap<String, Ban>,
    pub broadcasts: Vec<String>,
}

/// What console handlers get: shared state plus the shutdown flag.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    state: Arc<Mutex<ServiceState>>,
    shutdown: Arc<AtomicBool>,
}

impl ServiceHandle {
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = ServiceState {
            online: players.into_iter().map(Into::into).collect(),
            ..ServiceState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Locks the state; a poisoned lock is reported as a message.
    pub fn state(&self) -> Result<MutexGuard<'_, ServiceState>, String> {
        self.state
            .lock()
            .map_err(|_| "service state is unavailable".to_string())
    }

    pub fn shutdown_flag(&self) -> &AtomicBool {
        &self.shutdown
    }

    /// Asks the service loop to stop after its current tick.
    pub fn request_shutdown(&self) {
        info!("shutdown requested");
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Runs the service's own work until shutdown is requested.
    pub fn run_until_shutdown(&self) {
        info!("service running");
        let mut ticks: u64 = 0;
        while !self.shutdown.load(Ordering::SeqCst) {
            std::thread::sleep(TICK);
            ticks += 1;
        }
        debug!(ticks, "service loop finished");
        info!("service stopped");
    }
}
