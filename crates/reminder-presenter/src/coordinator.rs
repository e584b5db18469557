//! The presenter coordinator (component D): a single-threaded serializer
//! that receives dispatches on the GUI thread, enforces at-most-one
//! active reminder, queues overflow FIFO, and forwards user responses
//! back to the scheduler.

use crate::dispatch::DispatchReceiver;
use crate::sink::PresenterSink;
use reminder_config::Catalogue;
use reminder_scheduler::Scheduler;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Delay between one reminder completing and the next queued one being
/// presented, mirroring the source's 500ms `QTimer.singleShot`.
pub const QUEUE_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Per-presenter state machine: *Idle*, or *Presenting(name)* with a FIFO
/// queue of reminders waiting behind it.
pub struct Presenter<S: PresenterSink> {
    sink: S,
    catalogue: Arc<Catalogue>,
    scheduler: Scheduler,
    dispatch_rx: DispatchReceiver,
    active: Option<String>,
    queue: VecDeque<String>,
    delayed: Option<(Instant, String)>,
}

impl<S: PresenterSink> Presenter<S> {
    pub fn new(
        sink: S,
        catalogue: Arc<Catalogue>,
        scheduler: Scheduler,
        dispatch_rx: DispatchReceiver,
    ) -> Self {
        Self {
            sink,
            catalogue,
            scheduler,
            dispatch_rx,
            active: None,
            queue: VecDeque::new(),
            delayed: None,
        }
    }

    /// Name of the reminder currently being presented, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Reminders waiting behind the active one, in arrival order.
    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Drain pending dispatches and fire any delayed presentation whose
    /// deadline has elapsed. Call this from the host's event-loop idle
    /// handler; it never blocks.
    pub fn pump(&mut self) {
        self.pump_at(Instant::now());
    }

    pub(crate) fn pump_at(&mut self, now: Instant) {
        while let Some(name) = self.dispatch_rx.try_recv() {
            self.on_reminder_due(&name);
        }
        if let Some((deadline, _)) = &self.delayed {
            if now >= *deadline {
                let (_, name) = self.delayed.take().unwrap();
                self.present(name);
            }
        }
    }

    /// Invoked (indirectly, via the dispatch channel) when the scheduler
    /// determines a reminder is due. If nothing is active, presents
    /// immediately; otherwise appends to the FIFO queue.
    fn on_reminder_due(&mut self, name: &str) {
        if self.active.is_none() {
            self.present(name.to_string());
        } else {
            tracing::debug!(reminder = name, "presenter busy, queueing");
            self.queue.push_back(name.to_string());
        }
    }

    fn present(&mut self, name: String) {
        match self.catalogue.get(&name) {
            Some(def) => {
                self.sink.present(
                    &name,
                    &def.icon_ref,
                    def.snooze_seconds,
                    def.text.as_deref(),
                );
                self.active = Some(name);
            }
            None => {
                tracing::warn!(reminder = name.as_str(), "unknown reminder, dropping dispatch");
            }
        }
    }

    /// The user acknowledged the active reminder. Advances the scheduler
    /// past this occurrence and, if the queue is non-empty, schedules the
    /// next presentation after [`QUEUE_ADVANCE_DELAY`].
    pub fn on_user_complete(&mut self, name: &str) {
        self.scheduler.complete(name);
        self.active = None;
        self.advance_queue(Instant::now());
    }

    /// The user postponed the active reminder by `duration_seconds`.
    pub fn on_user_snooze(&mut self, name: &str, duration_seconds: u64) {
        self.scheduler.snooze(name, duration_seconds);
        self.active = None;
        self.advance_queue(Instant::now());
    }

    fn advance_queue(&mut self, now: Instant) {
        if let Some(next) = self.queue.pop_front() {
            self.delayed = Some((now + QUEUE_ADVANCE_DELAY, next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reminder_core::ReminderDefinition;
    use std::path::PathBuf;

    struct RecordingSink {
        presented: Vec<String>,
    }

    impl PresenterSink for RecordingSink {
        fn present(&mut self, name: &str, _icon: &std::path::Path, _snooze: u64, _text: Option<&str>) {
            self.presented.push(name.to_string());
        }
    }

    fn catalogue_with(names: &[&str]) -> Arc<Catalogue> {
        let mut catalogue = Catalogue::default();
        for name in names {
            catalogue.insert(ReminderDefinition::new(
                *name,
                reminder_core::cron::parse("* * * * *").unwrap(),
                PathBuf::from(format!("{name}.png")),
                300,
                None,
            ));
        }
        Arc::new(catalogue)
    }

    fn presenter(names: &[&str]) -> (Presenter<RecordingSink>, crate::dispatch::DispatchSender) {
        let (tx, rx) = crate::dispatch::channel();
        let presenter = Presenter::new(
            RecordingSink { presented: Vec::new() },
            catalogue_with(names),
            Scheduler::new(),
            rx,
        );
        (presenter, tx)
    }

    #[test]
    fn idle_to_presenting_on_first_due() {
        let (mut p, tx) = presenter(&["a"]);
        tx.dispatch("a");
        p.pump();
        assert_eq!(p.active(), Some("a"));
        assert_eq!(p.sink.presented, vec!["a".to_string()]);
    }

    #[test]
    fn second_due_while_presenting_is_queued() {
        let (mut p, tx) = presenter(&["a", "b"]);
        tx.dispatch("a");
        p.pump();
        tx.dispatch("b");
        p.pump();
        assert_eq!(p.active(), Some("a"));
        assert_eq!(p.queued().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn complete_with_empty_queue_returns_to_idle() {
        let (mut p, tx) = presenter(&["a"]);
        tx.dispatch("a");
        p.pump();
        p.on_user_complete("a");
        assert_eq!(p.active(), None);
        assert!(p.queued().next().is_none());
    }

    #[test]
    fn complete_with_queued_reminder_presents_after_delay() {
        let (mut p, tx) = presenter(&["a", "b"]);
        tx.dispatch("a");
        p.pump();
        tx.dispatch("b");
        p.pump();

        p.on_user_complete("a");
        assert_eq!(p.active(), None, "next presentation is delayed, not immediate");

        let start = Instant::now();
        p.pump_at(start); // before the delay elapses
        assert_eq!(p.active(), None);

        p.pump_at(start + QUEUE_ADVANCE_DELAY);
        assert_eq!(p.active(), Some("b"));
    }

    #[test]
    fn snooze_also_advances_the_queue() {
        let (mut p, tx) = presenter(&["a", "b"]);
        tx.dispatch("a");
        p.pump();
        tx.dispatch("b");
        p.pump();

        p.on_user_snooze("a", 300);
        let start = Instant::now();
        p.pump_at(start + QUEUE_ADVANCE_DELAY);
        assert_eq!(p.active(), Some("b"));
    }

    #[test]
    fn dispatches_are_processed_in_arrival_order() {
        let (mut p, tx) = presenter(&["a", "b", "c"]);
        tx.dispatch("a");
        tx.dispatch("b");
        tx.dispatch("c");
        p.pump();
        assert_eq!(p.active(), Some("a"));
        assert_eq!(p.queued().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn unknown_reminder_is_dropped_not_presented() {
        let (mut p, tx) = presenter(&[]);
        tx.dispatch("ghost");
        p.pump();
        assert_eq!(p.active(), None);
    }
}
