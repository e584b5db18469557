//! The cross-thread handoff between the scheduler's worker and the GUI
//! thread: single-shot message delivery with the reminder name as
//! payload, delivered in emission order.

use std::sync::mpsc;

/// Clone-able, thread-safe end of the handoff. Safe to pass as a
/// scheduler `on_due` callback — it only ever sends, never blocks.
#[derive(Clone)]
pub struct DispatchSender {
    inner: mpsc::Sender<String>,
}

impl DispatchSender {
    pub fn dispatch(&self, name: &str) {
        // The receiver is held by the presenter for the process lifetime;
        // a send error here means the presenter has shut down, which is
        // only possible during process exit.
        let _ = self.inner.send(name.to_string());
    }
}

/// GUI-thread end of the handoff. Not `Send`-shared; owned by exactly one
/// [`crate::Presenter`].
pub struct DispatchReceiver {
    inner: mpsc::Receiver<String>,
}

impl DispatchReceiver {
    pub(crate) fn try_recv(&self) -> Option<String> {
        self.inner.try_recv().ok()
    }
}

/// Create a fresh handoff channel.
pub fn channel() -> (DispatchSender, DispatchReceiver) {
    let (tx, rx) = mpsc::channel();
    (DispatchSender { inner: tx }, DispatchReceiver { inner: rx })
}
