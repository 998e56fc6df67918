//! Binary entrypoint for the slotkey launcher.
//!
//! Startup order matters: load the mapping first (so hotkeys work the moment
//! the tap is live), then start the launch consumer and the config watcher,
//! and only then hand the main thread to the event tap's run loop. The tap
//! never gets it back; process exit is the only teardown.

use std::{path::PathBuf, process};

use clap::Parser;
use tracing::error;

/// CLI log controls and filter construction.
mod logs;

#[derive(Parser, Debug)]
#[command(
    name = "slotkey",
    about = "Option+1..9 application launcher for macOS",
    version
)]
/// Command-line interface for the `slotkey` binary.
struct Cli {
    /// Path to the config file: one bundle identifier per line, line order
    /// defines slot order. Defaults to ~/.slotkey
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Logging controls
    #[command(flatten)]
    log: logs::LogArgs,
}

#[cfg(target_os = "macos")]
/// Default user-scoped config path: `~/.slotkey`.
fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".slotkey")
}

#[cfg(target_os = "macos")]
/// Wire everything up and park in the event tap run loop.
fn run(cli: &Cli) -> i32 {
    use slotkey_engine::{Dispatcher, LaunchQueue, MappingStore, OpenLauncher, spawn_consumer};
    use tracing::{info, warn};

    let path = cli.config.clone().unwrap_or_else(default_config_path);

    let store = MappingStore::new();
    if let Err(e) = config::reload(&path, &store) {
        // Not fatal: slots stay unmapped until the file appears and the
        // watcher picks it up.
        warn!(error = %e, "initial_config_load_failed");
    }

    let (queue, rx) = LaunchQueue::new();
    if let Err(e) = spawn_consumer(rx, OpenLauncher) {
        error!(error = %e, "failed to start launch consumer");
        return 1;
    }

    // Held for the life of the process; dropping it would stop the watch.
    let _watcher = match config::spawn_watcher(path.clone(), store.clone()) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "config_watch_unavailable_edits_will_not_hot_reload");
            None
        }
    };

    if !mac_tap::permissions::accessibility_ok() || !mac_tap::permissions::input_monitoring_ok() {
        warn!(
            "missing permissions; grant Accessibility and Input Monitoring under \
             System Settings \u{2192} Privacy & Security"
        );
    }

    info!(config = %path.display(), "listening for Option+1..9 hotkeys");
    let dispatcher = Dispatcher::new(store, queue);
    match mac_tap::run_event_loop(dispatcher) {
        Ok(()) => 0,
        Err(e) => {
            error!(
                error = %e,
                "couldn't start the event tap; check System Settings \u{2192} \
                 Privacy & Security \u{2192} Accessibility / Input Monitoring"
            );
            1
        }
    }
}

#[cfg(not(target_os = "macos"))]
/// Non-macOS stub: the tap and LaunchServices have no equivalent here.
fn run(_cli: &Cli) -> i32 {
    error!("slotkey requires macOS: it is built on CGEvent taps and LaunchServices");
    1
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(cli.log.env_filter())
        .init();
    process::exit(run(&cli));
}
