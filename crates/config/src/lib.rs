//! Configuration loading and hot reload.
//!
//! The config source is a plain text file, one launch target (bundle
//! identifier) per line. Lines are trimmed, blank lines skipped, and file
//! order defines slot order: line 1 binds slot 1's key, line 9 binds slot
//! 9's, anything beyond that is ignored. Reloading is idempotent, so the
//! watcher can afford to over-trigger on noisy file-system notifications.

mod error;
mod loader;
mod watcher;

pub use error::{Error, Result};
pub use loader::{load_targets, reload};
pub use watcher::spawn_watcher;
