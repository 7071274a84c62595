//! Loop Supervisor - The background polling task
//!
//! One task, one cycle at a time:
//!
//! ```text
//! start() ──► spawn ──► wait poll_interval ──► running? ──► check ──► repair?
//!                            ▲                                           │
//!                            └───────────────────────────────────────────┘
//! ```
//!
//! `stop()` clears the running flag and wakes the idle wait. A cycle that
//! is already in progress runs to completion; the task exits at the next
//! iteration boundary. Each `start()` bumps a run generation, so a task left
//! over from an earlier run can never keep polling next to a new one.
//!
//! A failed cycle is logged and recorded in the status, and the loop
//! carries on with the next one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{RepairError, Result};
use crate::port::host::GameHost;
use crate::sensor::{DurabilityCheck, WornReport};
use crate::settings::RepairSettings;
use crate::strategy::{RepairOutcome, RepairStrategy};

/// Result of one polling cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Slot that triggered the repair, if any
    pub worn: Option<WornReport>,
    pub outcome: Option<RepairOutcome>,
}

/// Snapshot of the supervisor's bookkeeping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopStatus {
    pub running: bool,
    pub cycles: u64,
    pub repairs: u64,
    pub last_check: Option<DateTime<Utc>>,
    pub last_outcome: Option<RepairOutcome>,
    pub last_error: Option<String>,
}

/// The running flag plus the generation of the run that owns it, packed
/// into one word (`generation << 1 | RUNNING`) so both change together.
#[derive(Debug, Default)]
struct RunState {
    word: AtomicU64,
    wake: Notify,
}

const RUNNING: u64 = 1;

impl RunState {
    /// Claim a new run and return its generation; `None` when already running
    fn begin(&self) -> Option<u64> {
        self.word
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |word| {
                (word & RUNNING == 0).then(|| (((word >> 1) + 1) << 1) | RUNNING)
            })
            .ok()
            .map(|previous| (previous >> 1) + 1)
    }

    /// Clear the running flag; true when it was set
    fn end(&self) -> bool {
        self.word.fetch_and(!RUNNING, Ordering::SeqCst) & RUNNING != 0
    }

    fn is_running(&self) -> bool {
        self.word.load(Ordering::SeqCst) & RUNNING != 0
    }

    fn is_current(&self, generation: u64) -> bool {
        self.word.load(Ordering::SeqCst) == (generation << 1) | RUNNING
    }
}

struct Shared {
    state: RunState,
    check: DurabilityCheck,
    strategy: RepairStrategy,
    poll_interval: Duration,
    status: Mutex<LoopStatus>,
}

impl Shared {
    fn lock_status(&self) -> MutexGuard<'_, LoopStatus> {
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn cycle(&self) -> Result<CycleReport> {
        let Some(worn) = self.check.check().await? else {
            return Ok(CycleReport {
                worn: None,
                outcome: None,
            });
        };

        let outcome = self.strategy.repair().await?;
        Ok(CycleReport {
            worn: Some(worn),
            outcome: Some(outcome),
        })
    }

    fn record(&self, result: &Result<CycleReport>) {
        let mut status = self.lock_status();
        status.cycles += 1;
        status.last_check = Some(Utc::now());

        match result {
            Ok(report) => {
                status.last_error = None;
                if let Some(outcome) = &report.outcome {
                    status.repairs += 1;
                    status.last_outcome = Some(outcome.clone());
                }
            }
            Err(e) => {
                status.last_error = Some(e.to_string());
            }
        }
    }
}

pub struct LoopSupervisor {
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LoopSupervisor {
    pub fn new(host: Arc<dyn GameHost>, settings: &RepairSettings) -> Self {
        let shared = Shared {
            state: RunState::default(),
            check: DurabilityCheck::new(host.clone(), settings.threshold),
            strategy: RepairStrategy::new(host, settings),
            poll_interval: settings.poll_interval,
            status: Mutex::new(LoopStatus::default()),
        };

        Self {
            shared: Arc::new(shared),
            task: Mutex::new(None),
        }
    }

    /// Start polling in the background.
    ///
    /// Returns `false` (and does nothing else) when already running.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> bool {
        let Some(generation) = self.shared.state.begin() else {
            info!("Auto-repair loop already running.");
            return false;
        };

        let handle = tokio::spawn(poll_loop(self.shared.clone(), generation));

        // A previous task may still be finishing its last cycle; it exits on
        // the generation mismatch, so dropping its handle is enough.
        self.task_slot().replace(handle);

        info!(
            interval_ms = self.shared.poll_interval.as_millis() as u64,
            threshold = %self.shared.check.threshold(),
            "Auto-repair loop started."
        );
        true
    }

    pub fn stop(&self) {
        if self.shared.state.end() {
            self.shared.state.wake.notify_waiters();
            info!("Auto-repair loop stopped.");
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.is_running()
    }

    /// Stop and wait for the polling task to finish its current cycle
    pub async fn shutdown(&self) -> Result<()> {
        self.stop();

        let handle = self.task_slot().take();
        if let Some(handle) = handle {
            handle
                .await
                .map_err(|e| RepairError::Task(e.to_string()))?;
        }
        Ok(())
    }

    /// Run a single cycle in the caller's task, outside the loop
    pub async fn run_once(&self) -> Result<CycleReport> {
        let result = self.shared.cycle().await;
        self.shared.record(&result);
        result
    }

    pub fn status(&self) -> LoopStatus {
        let mut status = self.shared.lock_status().clone();
        status.running = self.is_running();
        status
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for LoopSupervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(shared: Arc<Shared>, generation: u64) {
    debug!(generation, "Polling task started");

    loop {
        // Registered before the flag check so a stop() in between still wakes us
        let wake = shared.state.wake.notified();
        tokio::pin!(wake);
        wake.as_mut().enable();

        if !shared.state.is_current(generation) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(shared.poll_interval) => {}
            _ = &mut wake => {}
        }

        if !shared.state.is_current(generation) {
            break;
        }

        let result = shared.cycle().await;
        if let Err(e) = &result {
            warn!(error = %e, "Auto-repair cycle failed, continuing");
        }
        shared.record(&result);
    }

    debug!(generation, "Polling task exited");
}
