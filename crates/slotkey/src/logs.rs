//! CLI log controls and tracing filter construction.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Crate targets that constitute "our" logs.
const OUR_CRATES: &[&str] = &["slotkey", "slotkey_engine", "config", "mac_tap"];

/// Logging controls for the slotkey binary.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_filter"])]
    pub debug: bool,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "slotkey_engine=trace,config=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// Build a filter directive string that sets the same `level` for all of our crates.
fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    OUR_CRATES
        .iter()
        .map(|t| format!("{t}={lvl}"))
        .collect::<Vec<_>>()
        .join(",")
}

impl LogArgs {
    /// Compute the final filter spec string with precedence:
    /// - `log_filter`
    /// - `trace`/`debug` (crate-scoped)
    /// - `RUST_LOG` env
    /// - default to crate-scoped `info`
    pub fn spec(&self) -> String {
        if let Some(spec) = &self.log_filter {
            return spec.clone();
        }
        if self.trace {
            return level_spec_for("trace");
        }
        if self.debug {
            return level_spec_for("debug");
        }
        env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
    }

    /// Create an `EnvFilter` from the computed spec.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.spec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(trace: bool, debug: bool, log_filter: Option<&str>) -> LogArgs {
        LogArgs {
            trace,
            debug,
            log_filter: log_filter.map(str::to_string),
        }
    }

    #[test]
    fn explicit_filter_wins() {
        let spec = args(true, false, Some("mac_tap=trace")).spec();
        assert_eq!(spec, "mac_tap=trace");
    }

    #[test]
    fn level_flags_scope_to_our_crates() {
        let spec = args(false, true, None).spec();
        assert!(spec.contains("slotkey=debug"));
        assert!(spec.contains("mac_tap=debug"));
    }
}
