pub mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A desktop reminder daemon.
#[derive(Debug, Parser)]
#[command(name = "reminder-daemon", version, about)]
pub struct Cli {
    /// Configuration directory. Defaults to `$HOME/.config/reminder-system`.
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the scheduler and presenter (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Write an example config.toml into the config directory.
    Init,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse and validate config.toml, reporting any errors.
    Validate,
    /// Dump the resolved general settings (with defaults) as TOML.
    Show,
}

/// Resolve the configuration directory: `--config-dir`, or
/// `$HOME/.config/reminder-system`.
pub fn resolve_config_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::home_dir()
            .expect("could not determine home directory")
            .join(".config")
            .join("reminder-system")
    })
}
