//! Polling state machine.
//!
//! Two states, [`RefreshState::Idle`] and [`RefreshState::Polling`].
//! `start` runs one cycle straight away and then one per interval until
//! `stop`. Cycles start on a fixed rate measured from `start`; a cycle that
//! overruns delays the next tick instead of bunching them up. The polling
//! task only holds a weak reference, so dropping every handle ends it. `trigger_now` runs a single cycle in either state without
//! touching the schedule. Stopping never aborts a cycle that is already
//! running; its result is still delivered.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};
use std::time::Duration;

use acquisition::RecordSource;
use chrono::Utc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::observer::{CycleObserver, CycleReport, CycleTrigger};

/// MRMS publishes a new product roughly every two minutes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Polling,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshState::Idle => write!(f, "idle"),
            RefreshState::Polling => write!(f, "polling"),
        }
    }
}

struct Schedule {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

struct Inner {
    source: Arc<dyn RecordSource>,
    observers: Vec<Arc<dyn CycleObserver>>,
    width: u32,
    height: u32,
    interval: Duration,
    schedule: Mutex<Option<Schedule>>,
    started: AtomicU64,
    completed: AtomicU64,
    current: RwLock<Option<Arc<CycleReport>>>,
}

/// Drives acquire-and-render cycles. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct RefreshController {
    inner: Arc<Inner>,
}

impl RefreshController {
    pub fn new(source: Arc<dyn RecordSource>, width: u32, height: u32, interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                observers: Vec::new(),
                width,
                height,
                interval,
                schedule: Mutex::new(None),
                started: AtomicU64::new(0),
                completed: AtomicU64::new(0),
                current: RwLock::new(None),
            }),
        }
    }

    /// Add an observer. Only valid before the controller is cloned or started.
    pub fn with_observer(mut self, observer: Arc<dyn CycleObserver>) -> Self {
        match Arc::get_mut(&mut self.inner) {
            Some(inner) => inner.observers.push(observer),
            None => warn!("Observer added to a shared controller was ignored"),
        }
        self
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    pub fn state(&self) -> RefreshState {
        match *self.lock_schedule() {
            Some(_) => RefreshState::Polling,
            None => RefreshState::Idle,
        }
    }

    /// Number of cycles that have finished.
    pub fn cycles_completed(&self) -> u64 {
        self.inner.completed.load(Ordering::SeqCst)
    }

    /// The most recently completed cycle. Later completions replace it.
    pub fn current(&self) -> Option<Arc<CycleReport>> {
        self.inner
            .current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Begin polling. Returns false if already polling.
    pub fn start(&self) -> bool {
        let mut schedule = self.lock_schedule();
        if schedule.is_some() {
            debug!("Already polling");
            return false;
        }

        let (stop, stop_rx) = oneshot::channel();
        let inner = Arc::downgrade(&self.inner);
        let task = tokio::spawn(poll(inner, self.inner.interval, stop_rx));
        *schedule = Some(Schedule { stop, task });

        info!(interval_secs = self.inner.interval.as_secs(), "Auto-refresh started");
        true
    }

    /// Stop polling. Returns false if already idle.
    ///
    /// A cycle that is running keeps running and is still delivered.
    pub fn stop(&self) -> bool {
        match self.take_schedule() {
            Some(schedule) => {
                // The loop may already have exited; nothing to signal then.
                let _ = schedule.stop.send(());
                info!("Auto-refresh stopped");
                true
            }
            None => false,
        }
    }

    /// Stop polling and wait for any in-flight scheduled cycle to finish.
    pub async fn shutdown(&self) {
        if let Some(schedule) = self.take_schedule() {
            let _ = schedule.stop.send(());
            if let Err(e) = schedule.task.await {
                warn!(error = %e, "Polling task ended abnormally");
            }
            info!("Auto-refresh shut down");
        }
    }

    /// Run one cycle now, whatever the state.
    pub async fn trigger_now(&self) -> Arc<CycleReport> {
        self.run_cycle(CycleTrigger::Manual).await
    }

    async fn run_cycle(&self, trigger: CycleTrigger) -> Arc<CycleReport> {
        let cycle = self.inner.started.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle, %trigger, "Cycle started");

        let record = self.inner.source.latest().await;
        let operations = renderer::render(self.inner.width, self.inner.height, &record);

        let report = Arc::new(CycleReport {
            cycle,
            trigger,
            record,
            width: self.inner.width,
            height: self.inner.height,
            operations,
            completed_at: Utc::now(),
        });

        for observer in &self.inner.observers {
            observer.on_cycle(&report).await;
        }

        *self
            .inner
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&report));
        self.inner.completed.fetch_add(1, Ordering::SeqCst);

        report
    }

    fn lock_schedule(&self) -> MutexGuard<'_, Option<Schedule>> {
        self.inner.schedule.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take_schedule(&self) -> Option<Schedule> {
        self.lock_schedule().take()
    }
}

async fn poll(inner: Weak<Inner>, interval: Duration, mut stop: oneshot::Receiver<()>) {
    // `interval` panics on a zero period.
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick is immediate.
    ticker.tick().await;

    loop {
        // Hold a strong reference only while a cycle runs.
        match inner.upgrade() {
            Some(inner) => {
                RefreshController { inner }
                    .run_cycle(CycleTrigger::Scheduled)
                    .await;
            }
            None => break,
        }

        // A dropped sender means every handle is gone.
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = ticker.tick() => {}
        }
    }
    debug!("Polling loop exited");
}

impl fmt::Debug for RefreshController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshController")
            .field("state", &self.state())
            .field("interval", &self.inner.interval)
            .field("cycles_completed", &self.cycles_completed())
            .finish()
    }
}
