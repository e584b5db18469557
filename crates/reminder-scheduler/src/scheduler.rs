//! The background ticker (component C): owns scheduled reminders, wakes
//! once a second, detects due entries, and dispatches them across the
//! thread boundary to whatever presenter the caller wired up.

use crate::entry::{OnDue, ScheduledEntry};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use reminder_core::{cron, RuntimeError, RuntimeResult, StatusRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const STOP_WAIT: Duration = Duration::from_secs(2);

struct SchedulerState {
    // Insertion-ordered so `status()` reports reminders in the order they
    // were added, as the configuration loader produced them.
    entries: Mutex<Vec<(String, ScheduledEntry)>>,
    running: AtomicBool,
}

/// Owns the set of scheduled reminders and the worker thread that ticks
/// them. Cheap to clone; clones share the same worker and entry table.
#[derive(Clone)]
pub struct Scheduler {
    state: Arc<SchedulerState>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: Arc::new(SchedulerState {
                entries: Mutex::new(Vec::new()),
                running: AtomicBool::new(false),
            }),
            worker: Arc::new(Mutex::new(None)),
        }
    }

    /// Register or replace a reminder. Computes the initial `next_fire`
    /// from `now()`. Fails only if `schedule` does not parse.
    pub fn add(
        &self,
        name: impl Into<String>,
        schedule: &str,
        on_due: impl Fn(&str) + Send + Sync + 'static,
    ) -> RuntimeResult<()> {
        let name = name.into();
        let parsed = cron::parse(schedule).map_err(|source| RuntimeError::InvalidSchedule {
            schedule: schedule.to_string(),
            source,
        })?;
        let next_fire = parsed
            .next_after(&Local::now())
            .map_err(|_| RuntimeError::InvalidSchedule {
                schedule: schedule.to_string(),
                source: cron::ParseError {
                    field_index: 0,
                    field_name: "minute",
                    token: schedule.to_string(),
                    reason: "no occurrence exists within the search horizon".to_string(),
                },
            })?;
        let entry = ScheduledEntry::new(parsed, Arc::new(on_due) as OnDue, next_fire);

        let mut entries = self.state.entries.lock();
        match entries.iter_mut().find(|(n, _)| n == &name) {
            Some((_, existing)) => *existing = entry,
            None => entries.push((name, entry)),
        }
        Ok(())
    }

    /// Remove a reminder. Idempotent — no-op if `name` is unknown.
    pub fn remove(&self, name: &str) {
        let mut entries = self.state.entries.lock();
        entries.retain(|(n, _)| n != name);
    }

    /// Postpone a reminder's effective fire time. Idempotent; a no-op on
    /// an unknown name (logged, per the error taxonomy's UnknownReminder).
    pub fn snooze(&self, name: &str, seconds: u64) {
        let mut entries = self.state.entries.lock();
        match entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, entry)) => {
                entry.snoozed_until =
                    Some(Local::now() + chrono::Duration::seconds(seconds as i64));
            }
            None => tracing::warn!(reminder = name, "snooze: unknown reminder"),
        }
    }

    /// Clear any snooze and recompute `next_fire` from the current time.
    /// No-op on an unknown name.
    pub fn complete(&self, name: &str) {
        let mut entries = self.state.entries.lock();
        match entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, entry)) => {
                entry.snoozed_until = None;
                match entry.schedule.next_after(&Local::now()) {
                    Ok(next) => entry.next_fire = next,
                    Err(_) => tracing::warn!(
                        reminder = name,
                        "complete: schedule has no future occurrence"
                    ),
                }
            }
            None => tracing::warn!(reminder = name, "complete: unknown reminder"),
        }
    }

    /// Start the tick loop on a dedicated worker thread. Idempotent: a
    /// second call while already running is a no-op, not an error.
    pub fn start(&self) {
        if self.state.running.swap(true, Ordering::SeqCst) {
            tracing::debug!("scheduler already running, start() is a no-op");
            return;
        }
        let state = Arc::clone(&self.state);
        let handle = thread::Builder::new()
            .name("reminder-scheduler".to_string())
            .spawn(move || run_loop(&state))
            .expect("failed to spawn scheduler worker thread");
        *self.worker.lock() = Some(handle);
        tracing::info!("scheduler started");
    }

    /// Signal the worker to stop and wait up to ~2s for it to exit. An
    /// in-flight `on_due` invocation is allowed to complete. Returns
    /// regardless of whether the worker has actually exited by then.
    pub fn stop(&self) {
        if !self.state.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.worker.lock().take() {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let _ = handle.join();
                let _ = tx.send(());
            });
            let _ = rx.recv_timeout(STOP_WAIT);
        }
        tracing::info!("scheduler stopped");
    }

    /// Snapshot the scheduling state of every registered reminder.
    pub fn status(&self) -> HashMap<String, StatusRecord> {
        let now = Local::now();
        let entries = self.state.entries.lock();
        entries
            .iter()
            .map(|(name, entry)| {
                let effective_next = entry.effective_next(now);
                (
                    name.clone(),
                    StatusRecord {
                        next_fire: entry.next_fire,
                        snoozed_until: entry.snoozed_until,
                        effective_next,
                    },
                )
            })
            .collect()
    }
}

fn run_loop(state: &SchedulerState) {
    while state.running.load(Ordering::SeqCst) {
        tick(state, Local::now());
        if !state.running.load(Ordering::SeqCst) {
            break;
        }
        thread::sleep(TICK_INTERVAL);
    }
}

fn tick(state: &SchedulerState, now: DateTime<Local>) {
    let minute_index = now.timestamp().div_euclid(60);
    let mut due: Vec<(String, OnDue)> = Vec::new();

    {
        let mut entries = state.entries.lock();
        for (name, entry) in entries.iter_mut() {
            let effective = entry.effective_next(now);
            if effective > now {
                continue;
            }
            if entry.last_dispatched_minute == Some(minute_index) {
                continue;
            }

            entry.last_dispatched_minute = Some(minute_index);
            entry.snoozed_until = None;
            match entry.schedule.next_after(&now) {
                Ok(next) => entry.next_fire = next,
                Err(_) => tracing::warn!(
                    reminder = name.as_str(),
                    "schedule has no future occurrence within the search horizon"
                ),
            }
            due.push((name.clone(), Arc::clone(&entry.on_due)));
        }
    }
    // Lock released before invoking callbacks: on_due must never observe
    // the scheduler lock held, so it can call back into snooze/complete.

    for (name, on_due) in due {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| on_due(&name)));
        if let Err(payload) = outcome {
            let message = panic_message(&payload);
            tracing::error!(reminder = name.as_str(), error = message, "on_due callback panicked; tick continues");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
