//! The scancode → launch-target mapping and its shared store.

use std::{collections::HashMap, fmt, sync::Arc};

use mac_tap::Scancode;
use parking_lot::Mutex;

use crate::slots::{SLOT_SCANCODES, slot_of};

/// Opaque application identifier, e.g. a bundle id like `com.apple.Safari`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget(String);

impl LaunchTarget {
    /// Wrap an identifier. No validation beyond what the spawn call enforces.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable scancode → target table, built whole before anyone can see it.
#[derive(Debug, Default)]
pub struct MappingSnapshot {
    table: HashMap<Scancode, LaunchTarget>,
}

impl MappingSnapshot {
    /// Assign `targets` positionally to the hotkey row: the first target goes
    /// to slot 1's key, and so on. Targets beyond the row length are ignored;
    /// a shortfall leaves the remaining slots unmapped.
    pub fn from_targets<I>(targets: I) -> Self
    where
        I: IntoIterator<Item = LaunchTarget>,
    {
        Self {
            table: SLOT_SCANCODES.iter().copied().zip(targets).collect(),
        }
    }

    /// Target bound to `scancode`, if any.
    pub fn get(&self, scancode: Scancode) -> Option<&LaunchTarget> {
        self.table.get(&scancode)
    }

    /// Number of mapped slots.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when no slot is mapped.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Mapped `(slot, target)` pairs in slot order, for operator logs.
    pub fn assignments(&self) -> impl Iterator<Item = (usize, &LaunchTarget)> {
        SLOT_SCANCODES.iter().filter_map(|&sc| {
            self.table
                .get(&sc)
                .map(|t| (slot_of(sc).unwrap_or_default(), t))
        })
    }
}

/// Shared handle to the currently installed [`MappingSnapshot`].
///
/// The config loader is the sole writer ([`replace`](Self::replace)); the tap
/// thread is the sole reader ([`lookup`](Self::lookup)). The lock guards only
/// an `Arc` swap/clone, so hold times are a few instructions and neither side
/// ever blocks on I/O while holding it. Readers always observe a whole
/// snapshot: old or new, never a mix.
#[derive(Clone, Default)]
pub struct MappingStore {
    current: Arc<Mutex<Arc<MappingSnapshot>>>,
}

impl MappingStore {
    /// Create a store with an empty snapshot installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `snapshot` as the visible table, atomically w.r.t. `lookup`.
    pub fn replace(&self, snapshot: MappingSnapshot) {
        *self.current.lock() = Arc::new(snapshot);
    }

    /// Target for `scancode` under the currently installed snapshot.
    pub fn lookup(&self, scancode: Scancode) -> Option<LaunchTarget> {
        self.snapshot().get(scancode).cloned()
    }

    /// The currently installed snapshot.
    pub fn snapshot(&self) -> Arc<MappingSnapshot> {
        Arc::clone(&self.current.lock())
    }
}
