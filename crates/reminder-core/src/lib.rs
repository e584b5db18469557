//! Shared types for the reminder daemon: the cron recurrence evaluator,
//! the reminder/settings data model, and the error taxonomy every other
//! crate propagates.

pub mod cron;
pub mod error;
pub mod model;

pub use cron::{CronExpression, ParseError, UnsatisfiableError};
pub use error::{ConfigError, ConfigResult, RuntimeError, RuntimeResult};
pub use model::{GeneralSettings, ReminderDefinition, StatusRecord, DEFAULT_SNOOZE_SECONDS};
