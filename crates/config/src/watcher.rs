//! Config file watcher for hot reload.

use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as _};
use slotkey_engine::MappingStore;
use tracing::{debug, info, warn};

use crate::loader::reload;

/// Delay between a change notification and the re-read, letting multi-step
/// editor writes (write temp file, rename over the original) settle first.
const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Watch the directory containing `config_path` and reload the mapping on
/// every relevant change.
///
/// The directory (not the file) is watched because many editors replace the
/// file rather than modifying it in place, which would sever a file-level
/// watch. Notifications are matched by resolved path or base name and may be
/// spurious or duplicated; reloading is idempotent so over-triggering is
/// harmless, and a failed reload logs and keeps the installed mapping.
///
/// The returned watcher owns the background watch; dropping it stops the
/// watch, so the caller holds it for the life of the process.
pub fn spawn_watcher(config_path: PathBuf, store: MappingStore) -> notify::Result<RecommendedWatcher> {
    let dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let watch_path = config_path.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if !event.paths.iter().any(|p| matches_config(p, &watch_path)) {
                return;
            }
            debug!(kind = ?event.kind, "config_change_detected");
            thread::sleep(SETTLE_DELAY);
            info!("config_changed_reloading");
            if let Err(e) = reload(&watch_path, &store) {
                warn!(error = %e, "config_reload_failed_keeping_previous");
            }
        }
        Err(e) => warn!(error = %e, "config_watch_error"),
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!(path = %config_path.display(), "config_watcher_started");
    Ok(watcher)
}

/// Match by full path or base name. A rename-over edit reports the temp
/// sibling's path, so base-name equality is the net that catches it.
fn matches_config(event_path: &Path, config_path: &Path) -> bool {
    event_path == config_path
        || (event_path.file_name().is_some()
            && event_path.file_name() == config_path.file_name())
}
