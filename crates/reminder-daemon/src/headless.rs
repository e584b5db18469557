//! The headless binary has no tray icon or overlay window, so it cannot
//! actually show a reminder. It logs the presentation instead and lets
//! `main`'s event loop immediately acknowledge it — see `serve()`.

use reminder_presenter::PresenterSink;
use std::path::Path;

pub struct LoggingSink;

impl PresenterSink for LoggingSink {
    fn present(&mut self, name: &str, icon_path: &Path, snooze_seconds: u64, text: Option<&str>) {
        tracing::info!(
            reminder = name,
            icon = %icon_path.display(),
            snooze_seconds,
            text = text.unwrap_or(""),
            "reminder due"
        );
    }
}
