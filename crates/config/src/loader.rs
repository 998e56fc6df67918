//! Parse the launch-target list and install it into the mapping store.

use std::{fs, path::Path};

use slotkey_engine::{LaunchTarget, MappingSnapshot, MappingStore};
use tracing::info;

use crate::error::{Error, Result};

/// Read `path` and parse one launch target per non-blank line, trimmed, in
/// file order. No further validation: the spawn call is the arbiter of
/// whether an identifier means anything.
pub fn load_targets(path: &Path) -> Result<Vec<LaunchTarget>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(LaunchTarget::new)
        .collect())
}

/// Load `path`, build a fresh snapshot, and install it into `store`.
///
/// The snapshot is built whole before `replace`, so concurrent lookups only
/// ever see the old table or the new one. On error nothing is installed and
/// the previous mapping stays in force. The slot table is logged on success
/// for operator visibility.
pub fn reload(path: &Path, store: &MappingStore) -> Result<()> {
    let targets = load_targets(path)?;
    let snapshot = MappingSnapshot::from_targets(targets);
    for (slot, target) in snapshot.assignments() {
        info!("[{slot}] -> {target}");
    }
    store.replace(snapshot);
    Ok(())
}
