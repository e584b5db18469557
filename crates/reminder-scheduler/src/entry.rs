//! Mutable scheduler-owned state for one reminder.

use chrono::{DateTime, Local};
use reminder_core::CronExpression;
use std::sync::Arc;

/// The callback invoked when a reminder becomes due. It must be safe to
/// call from the background worker thread; the scheduler never assumes
/// it is thread-affine. See the crate docs for the cross-thread handoff
/// contract expected of implementations.
pub type OnDue = Arc<dyn Fn(&str) + Send + Sync>;

/// Scheduler-owned state for one registered reminder. Held exclusively by
/// the [`crate::Scheduler`] and mutated only under its entry lock.
pub(crate) struct ScheduledEntry {
    pub schedule: CronExpression,
    pub on_due: OnDue,
    pub next_fire: DateTime<Local>,
    pub snoozed_until: Option<DateTime<Local>>,
    pub last_dispatched_minute: Option<i64>,
}

impl ScheduledEntry {
    pub fn new(schedule: CronExpression, on_due: OnDue, next_fire: DateTime<Local>) -> Self {
        Self {
            schedule,
            on_due,
            next_fire,
            snoozed_until: None,
            last_dispatched_minute: None,
        }
    }

    /// The instant this entry is next due, accounting for an active snooze.
    pub fn effective_next(&self, now: DateTime<Local>) -> DateTime<Local> {
        match self.snoozed_until {
            Some(t) if t > now => t,
            _ => self.next_fire,
        }
    }
}
