mod cli;
mod headless;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command, ConfigCommand};
use reminder_core::ConfigError;
use reminder_presenter::Presenter;
use reminder_scheduler::Scheduler;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// How often the headless event loop pumps the presenter and checks for
/// a shutdown signal. Analogous to the GUI event loop's idle tick.
const EVENT_LOOP_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_dir = cli::resolve_config_dir(cli.config_dir);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            init_tracing();
            serve(&config_dir)
        }
        Command::Config(ConfigCommand::Validate) => {
            if cli::config::validate(&config_dir) {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Command::Config(ConfigCommand::Show) => {
            cli::config::show(&config_dir);
            Ok(())
        }
        Command::Init => init(&config_dir),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reminder_daemon=debug")),
        )
        .init();
}

fn init(config_dir: &std::path::Path) -> anyhow::Result<()> {
    let path = reminder_config::write_example(config_dir)
        .context("failed to write example config")?;
    println!("Created example config at: {}", path.display());
    Ok(())
}

/// Load the catalogue, wire the scheduler to the presenter, and run the
/// headless event loop until SIGINT. Exit code follows §6: 0 on clean
/// shutdown, non-zero if initialization fails.
fn serve(config_dir: &std::path::Path) -> anyhow::Result<()> {
    tracing::info!("reminder daemon starting");

    let (catalogue, _general) = match reminder_config::load(config_dir) {
        Ok(loaded) => loaded,
        Err(ConfigError::Missing(path)) => {
            tracing::error!(path = %path.display(), "config file not found");
            let written = reminder_config::write_example(config_dir)
                .context("also failed to write an example config")?;
            anyhow::bail!(
                "no configuration found; wrote an example to {}. Edit it and restart.",
                written.display()
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "config invalid");
            return Err(err).context("config invalid");
        }
    };

    if catalogue.is_empty() {
        anyhow::bail!("no reminders configured; add reminders to config.toml and restart");
    }

    tracing::info!(count = catalogue.len(), "loaded reminders");

    let catalogue = Arc::new(catalogue);
    let scheduler = Scheduler::new();
    let (dispatch_tx, dispatch_rx) = reminder_presenter::channel();

    for def in catalogue.iter() {
        let tx = dispatch_tx.clone();
        let name = def.name.clone();
        let result = scheduler.add(def.name.clone(), def.schedule.source(), move |due_name| {
            tx.dispatch(due_name);
        });
        if let Err(e) = result {
            // def.schedule already parsed successfully at load time, so
            // this can only happen if the source text round-trip differs.
            tracing::error!(reminder = %name, error = %e, "failed to schedule reminder");
        }
    }

    let sink = headless::LoggingSink;
    let mut presenter = Presenter::new(sink, Arc::clone(&catalogue), scheduler.clone(), dispatch_rx);

    scheduler.start();
    tracing::info!("reminder daemon running, press Ctrl+C to quit");

    let shutdown = Arc::new(AtomicBool::new(false));
    if let Err(e) = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown))
    {
        tracing::warn!(error = %e, "failed to install SIGINT handler");
    }

    while !shutdown.load(Ordering::Relaxed) {
        presenter.pump();
        // No interactive presenter is wired in the headless binary: the
        // reminder was already logged by `LoggingSink`, so acknowledge it
        // immediately rather than leaving it "presenting" forever.
        if let Some(name) = presenter.active().map(str::to_string) {
            presenter.on_user_complete(&name);
        }
        std::thread::sleep(EVENT_LOOP_INTERVAL);
    }

    tracing::info!("shutting down");
    scheduler.stop();
    Ok(())
}
