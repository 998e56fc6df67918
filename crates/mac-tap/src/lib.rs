//! macOS keyboard event tap adapter.
//!
//! This crate owns every CoreGraphics and CoreFoundation detail of global
//! keyboard interception: tap creation, run-loop integration, and prompt
//! re-enabling when the OS disables the tap. Everything above it is written
//! against the portable [`TapEvent`]/[`Disposition`]/[`EventHandler`] surface
//! defined here, so hotkey logic can be unit-tested by feeding synthetic
//! events to a handler directly.
//!
//! The handler is invoked serially on the tap's run-loop thread and nowhere
//! else. Handlers may therefore keep unsynchronized per-interval state (held
//! keys, modifier edges) without locks.

mod error;
#[cfg(target_os = "macos")]
pub mod permissions;
#[cfg(target_os = "macos")]
mod sys;

pub use error::{Error, Result};
#[cfg(target_os = "macos")]
pub use sys::run_event_loop;

/// macOS hardware virtual keycode (`kVK_*`, `NSEvent.keyCode`): a
/// layout-independent, positional identifier for a physical key.
pub type Scancode = u16;

/// A keyboard event as seen by the tap, reduced to what hotkey dispatch needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEvent {
    /// A key went down (includes OS auto-repeats while held).
    KeyDown {
        /// Physical key that went down.
        scancode: Scancode,
        /// Whether the Option modifier bit was set in this event's own flag
        /// field. This is authoritative over any modifier state the handler
        /// tracks itself: a flags-changed event may still be in flight behind
        /// this key-down.
        option_held: bool,
    },
    /// A key was released.
    KeyUp {
        /// Physical key that was released.
        scancode: Scancode,
    },
    /// The modifier flag field changed.
    FlagsChanged {
        /// Whether the Option modifier bit is set after the change.
        option_held: bool,
    },
}

/// What the tap should do with the physical event after the handler has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Deliver the event to other applications unmodified.
    Forward,
    /// Swallow the event; it never reaches the foreground app.
    Suppress,
}

/// Hotkey logic seam: one decision per tap event.
///
/// Implementations must never panic; the C callback boundary cannot observe
/// or recover from an unwind. Treat any unexpected condition as "no match"
/// and return [`Disposition::Forward`].
pub trait EventHandler {
    /// Inspect one event and decide whether to forward or suppress it.
    fn handle(&mut self, event: TapEvent) -> Disposition;
}
