//! Autosave scheduler.
//!
//! Persists the journey without blocking edits while bounding two things:
//! the delay after the last edit (debounce) and the worst-case staleness of
//! the stored copy under continuous editing (forced flush).
//!
//! ```text
//! change ──► dirty=true, status=saving ──► debounce timer reset (2s)
//!                                                │ quiet period elapsed
//!                                                ▼
//!  every 5s: dirty && since_last_flush > 30s ──► flush ──► ok:  dirty=false, saved
//!                                                     └──► err: dirty stays, error
//! reset ───────────────────────────────────────► flush immediately
//! ```
//!
//! One task owns both timers, so flushes never overlap. Each flush writes
//! the current snapshot (last write wins).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::journey::models::JourneyState;
use crate::journey::persistence::save_journey;
use crate::journey::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveConfig {
    /// Quiet period after the last change before a flush.
    pub debounce: Duration,
    /// How often the forced-flush check runs.
    pub check_interval: Duration,
    /// Dirty state older than this is flushed even while edits continue.
    pub max_staleness: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(2_000),
            check_interval: Duration::from_millis(5_000),
            max_staleness: Duration::from_millis(30_000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

/// What the UI sees of the scheduler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutosaveStatus {
    pub has_unsaved_changes: bool,
    pub status: SaveStatus,
    pub last_saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Tracker {
    dirty: bool,
    /// Bumped on every change so a flush can tell whether it captured the latest edit.
    generation: u64,
    status: SaveStatus,
    last_flush: Instant,
    last_saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum Command {
    Changed,
    Reset,
    CheckNow,
    Shutdown,
}

/// Cloneable handle used by the store to report changes.
#[derive(Clone)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<Command>,
    tracker: Arc<Mutex<Tracker>>,
}

/// Owns the scheduler task; join it after `shutdown()` on teardown.
pub struct AutosaveTask {
    join: JoinHandle<()>,
}

struct Scheduler {
    rx: mpsc::UnboundedReceiver<Command>,
    tracker: Arc<Mutex<Tracker>>,
    journey: Arc<RwLock<JourneyState>>,
    storage: Arc<dyn KeyValueStore>,
    config: AutosaveConfig,
}

fn lock(tracker: &Mutex<Tracker>) -> MutexGuard<'_, Tracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Starts the scheduler. The journey passed in is treated as already clean:
/// whatever was loaded at startup is never saved back until it changes.
pub fn spawn(
    journey: Arc<RwLock<JourneyState>>,
    storage: Arc<dyn KeyValueStore>,
    config: AutosaveConfig,
) -> (AutosaveHandle, AutosaveTask) {
    let (tx, rx) = mpsc::unbounded_channel();
    let tracker = Arc::new(Mutex::new(Tracker {
        dirty: false,
        generation: 0,
        status: SaveStatus::Idle,
        last_flush: Instant::now(),
        last_saved_at: None,
    }));

    let scheduler = Scheduler {
        rx,
        tracker: Arc::clone(&tracker),
        journey,
        storage,
        config,
    };
    let join = tokio::spawn(scheduler.run());

    (AutosaveHandle { tx, tracker }, AutosaveTask { join })
}

impl AutosaveHandle {
    /// Marks the journey dirty and (re)starts the debounce window.
    pub fn mark_changed(&self) {
        self.bump();
        self.send(Command::Changed);
    }

    /// Flushes immediately, skipping the debounce window.
    pub fn flush_now(&self) {
        self.bump();
        self.send(Command::Reset);
    }

    /// Runs the forced-flush check right away instead of waiting for the next tick.
    pub fn check_now(&self) {
        self.send(Command::CheckNow);
    }

    pub fn shutdown(&self) {
        self.send(Command::Shutdown);
    }

    pub fn status(&self) -> AutosaveStatus {
        let t = lock(&self.tracker);
        AutosaveStatus {
            has_unsaved_changes: t.dirty,
            status: t.status,
            last_saved_at: t.last_saved_at,
        }
    }

    fn bump(&self) {
        let mut t = lock(&self.tracker);
        t.dirty = true;
        t.generation += 1;
        t.status = SaveStatus::Saving;
    }

    fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            debug!("Autosave scheduler already stopped; command dropped");
        }
    }
}

impl AutosaveTask {
    pub async fn join(self) {
        if let Err(e) = self.join.await {
            warn!("Autosave task ended abnormally: {e}");
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

impl Scheduler {
    async fn run(mut self) {
        let period = self.config.check_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut debounce: Option<Instant> = None;

        loop {
            tokio::select! {
                command = self.rx.recv() => match command {
                    Some(Command::Changed) => {
                        debounce = Some(Instant::now() + self.config.debounce);
                    }
                    Some(Command::Reset) => {
                        debounce = None;
                        self.flush("immediate");
                    }
                    Some(Command::CheckNow) => self.forced_check(),
                    Some(Command::Shutdown) | None => {
                        if lock(&self.tracker).dirty {
                            self.flush("teardown");
                        }
                        break;
                    }
                },
                _ = wait_for(debounce) => {
                    debounce = None;
                    if lock(&self.tracker).dirty {
                        self.flush("debounce");
                    }
                }
                _ = ticker.tick() => self.forced_check(),
            }
        }

        info!("Autosave scheduler stopped");
    }

    fn forced_check(&self) {
        let overdue = {
            let t = lock(&self.tracker);
            t.dirty && t.last_flush.elapsed() > self.config.max_staleness
        };
        if overdue {
            self.flush("forced");
        }
    }

    /// Writes the current snapshot. Failures only touch the status; the dirty
    /// flag stays set so the next timer retries.
    fn flush(&self, reason: &str) {
        let generation = lock(&self.tracker).generation;
        let snapshot = self
            .journey
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        // The blob is one small file; writing inline keeps flushes strictly serialized.
        let result = save_journey(self.storage.as_ref(), &snapshot);

        let mut t = lock(&self.tracker);
        match result {
            Ok(()) => {
                // A change that landed while we were writing keeps the state dirty.
                t.dirty = t.generation != generation;
                t.last_flush = Instant::now();
                t.last_saved_at = Some(Utc::now());
                t.status = if t.dirty {
                    SaveStatus::Saving
                } else {
                    SaveStatus::Saved
                };
                debug!("Journey saved ({reason})");
            }
            Err(e) => {
                t.status = SaveStatus::Error;
                warn!("Journey autosave failed ({reason}): {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::storage::{MemoryStore, StorageError};

    /// Records the (paused) clock instant of every successful write.
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryStore,
        writes: Mutex<Vec<Instant>>,
    }

    impl RecordingStore {
        fn times(&self) -> Vec<Instant> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl KeyValueStore for RecordingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value)?;
            self.writes.lock().unwrap().push(Instant::now());
            Ok(())
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn start(
        store: Arc<dyn KeyValueStore>,
    ) -> (Arc<RwLock<JourneyState>>, AutosaveHandle, AutosaveTask) {
        let journey = Arc::new(RwLock::new(JourneyState::default()));
        let (handle, task) = spawn(Arc::clone(&journey), store, AutosaveConfig::default());
        (journey, handle, task)
    }

    fn edit(journey: &RwLock<JourneyState>, handle: &AutosaveHandle, income: f64) {
        journey.write().unwrap().budget_data.income = income;
        handle.mark_changed();
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_waits_for_quiet_period() {
        let store = Arc::new(RecordingStore::default());
        let (journey, handle, _task) = start(store.clone());
        let t0 = Instant::now();

        edit(&journey, &handle, 1.0);
        tokio::time::sleep(ms(500)).await;
        edit(&journey, &handle, 2.0);
        tokio::time::sleep(ms(500)).await;
        edit(&journey, &handle, 3.0);

        tokio::time::sleep_until(t0 + ms(2_999)).await;
        assert!(store.times().is_empty());
        assert_eq!(handle.status().status, SaveStatus::Saving);

        tokio::time::sleep_until(t0 + ms(3_001)).await;
        let times = store.times();
        assert_eq!(times.len(), 1);
        assert!(times[0] >= t0 + ms(3_000));

        tokio::time::sleep(ms(60_000)).await;
        assert_eq!(store.times().len(), 1);

        let status = handle.status();
        assert!(!status.has_unsaved_changes);
        assert_eq!(status.status, SaveStatus::Saved);
        assert!(status.last_saved_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_flush_bounds_staleness_under_continuous_edits() {
        let store = Arc::new(RecordingStore::default());
        let (journey, handle, _task) = start(store.clone());
        let t0 = Instant::now();

        for i in 0..120u64 {
            edit(&journey, &handle, i as f64);
            tokio::time::sleep(ms(1_000)).await;
        }

        let times = store.times();
        assert!(times.len() >= 3, "expected forced flushes, got {}", times.len());
        let mut previous = t0;
        for at in times {
            assert!(at - previous <= ms(35_000), "gap of {:?}", at - previous);
            assert!(at - previous > ms(30_000) || previous != t0);
            previous = at;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_check_after_flush_writes_nothing() {
        let store = Arc::new(RecordingStore::default());
        let (journey, handle, _task) = start(store.clone());

        edit(&journey, &handle, 10.0);
        tokio::time::sleep(ms(2_100)).await;
        assert_eq!(store.times().len(), 1);

        tokio::time::sleep(ms(40_000)).await;
        handle.check_now();
        tokio::time::sleep(ms(10)).await;
        assert_eq!(store.times().len(), 1);

        edit(&journey, &handle, 11.0);
        tokio::time::sleep(ms(2_100)).await;
        assert_eq!(store.times().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_now_bypasses_debounce() {
        let store = Arc::new(RecordingStore::default());
        let (journey, handle, _task) = start(store.clone());
        let t0 = Instant::now();

        edit(&journey, &handle, 900.0);
        *journey.write().unwrap() = JourneyState::default();
        handle.flush_now();
        tokio::time::sleep(ms(1)).await;

        let times = store.times();
        assert_eq!(times.len(), 1);
        assert!(times[0] - t0 < ms(2_000));
        let saved = store.inner.get(crate::journey::persistence::JOURNEY_DATA_KEY).unwrap();
        let saved: JourneyState = serde_json::from_str(&saved.unwrap()).unwrap();
        assert_eq!(saved, JourneyState::default());

        // The pending debounce was cancelled along with the flush.
        tokio::time::sleep(ms(5_000)).await;
        assert_eq!(store.times().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_flush_keeps_dirty_and_retries() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let (journey, handle, _task) = start(store.clone());

        edit(&journey, &handle, 1500.0);
        tokio::time::sleep(ms(2_100)).await;
        let status = handle.status();
        assert_eq!(status.status, SaveStatus::Error);
        assert!(status.has_unsaved_changes);
        assert!(status.last_saved_at.is_none());

        store.set_failing(false);
        tokio::time::sleep(ms(35_000)).await;
        let status = handle.status();
        assert_eq!(status.status, SaveStatus::Saved);
        assert!(!status.has_unsaved_changes);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_scheduler_never_writes() {
        let store = Arc::new(MemoryStore::new());
        let (_journey, handle, _task) = start(store.clone());
        tokio::time::sleep(ms(120_000)).await;
        assert_eq!(store.write_count(), 0);
        assert_eq!(handle.status().status, SaveStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_dirty_state() {
        let store = Arc::new(MemoryStore::new());
        let (journey, handle, task) = start(store.clone());

        edit(&journey, &handle, 42.0);
        handle.shutdown();
        task.join().await;

        assert_eq!(store.write_count(), 1);
        // Commands after teardown are dropped quietly.
        handle.mark_changed();
    }
}
