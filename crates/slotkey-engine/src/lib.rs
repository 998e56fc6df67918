//! Slotkey engine.
//!
//! The concurrent core behind Option+digit app launching:
//! - [`MappingStore`]: the hot-reloadable scancode → launch-target table,
//!   replaced whole by the config loader and read from the tap callback
//! - [`Dispatcher`]: the per-event state machine that debounces held keys
//!   and decides forward vs. suppress
//! - [`LaunchQueue`] + [`spawn_consumer`]: the handoff that keeps process
//!   spawning off the tap thread
//!
//! Three threads touch this crate for the life of the process: the OS tap
//! thread (dispatcher + lookups, never blocks), the config-watch thread
//! (snapshot replacement), and the launch-consumer thread (queue drain +
//! spawn). The mapping lock and the queue channel are the only two points
//! of contact between them.

mod dispatch;
mod error;
mod launch;
mod mapping;
mod slots;

pub use dispatch::Dispatcher;
pub use error::LaunchError;
pub use launch::{LaunchQueue, Launcher, OpenLauncher, spawn_consumer};
pub use mapping::{LaunchTarget, MappingSnapshot, MappingStore};
pub use slots::{SLOT_SCANCODES, slot_of};
