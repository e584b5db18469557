//! Shared, immutable data model: reminder definitions and presentation
//! settings loaded once at startup and referenced by every other crate.

use crate::cron::CronExpression;
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::PathBuf;

/// One scheduled reminder as declared in the configuration file.
///
/// Immutable once constructed — the scheduler mutates a [`ScheduledEntry`]
/// that references this definition, never the definition itself.
#[derive(Debug, Clone)]
pub struct ReminderDefinition {
    pub name: String,
    pub schedule: CronExpression,
    pub icon_ref: PathBuf,
    pub snooze_seconds: u64,
    pub text: Option<String>,
}

impl ReminderDefinition {
    pub fn new(
        name: impl Into<String>,
        schedule: CronExpression,
        icon_ref: PathBuf,
        snooze_seconds: u64,
        text: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            schedule,
            icon_ref,
            snooze_seconds,
            text,
        }
    }
}

/// Default snooze duration, in seconds, applied when a reminder omits
/// `snooze_duration`.
pub const DEFAULT_SNOOZE_SECONDS: u64 = 300;

/// Presentation tunables. Consumed only by the presenter; the scheduler
/// never reads these fields.
///
/// Deserializes directly from the `[general]` table: any field absent
/// from the configuration file falls back to its documented default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "default_text_font")]
    pub text_font: String,
    #[serde(default = "default_text_size")]
    pub text_size: u32,
    #[serde(default = "default_icon_scale")]
    pub icon_scale: f64,
    #[serde(default = "default_max_opacity")]
    pub max_opacity: f64,
    #[serde(default = "default_fade_in_duration")]
    pub fade_in_duration: u32,
    #[serde(default = "default_fade_out_duration")]
    pub fade_out_duration: u32,
}

fn default_text_font() -> String {
    "Sans Serif".to_string()
}
fn default_text_size() -> u32 {
    24
}
fn default_icon_scale() -> f64 {
    1.0
}
fn default_max_opacity() -> f64 {
    0.85
}
fn default_fade_in_duration() -> u32 {
    2000
}
fn default_fade_out_duration() -> u32 {
    500
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            text_font: default_text_font(),
            text_size: default_text_size(),
            icon_scale: default_icon_scale(),
            max_opacity: default_max_opacity(),
            fade_in_duration: default_fade_in_duration(),
            fade_out_duration: default_fade_out_duration(),
        }
    }
}

/// A point-in-time snapshot of one reminder's scheduling state, returned
/// by [`crate`]-independent `status()` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub next_fire: DateTime<Local>,
    pub snoozed_until: Option<DateTime<Local>>,
    pub effective_next: DateTime<Local>,
}
