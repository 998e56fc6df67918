//! Minimal permission preflight for the event tap.
//!
//! No prompting happens here: the binary is responsible for pointing the user
//! at System Settings when a check fails. Both calls are fast and side-effect
//! free.

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn CGPreflightListenEventAccess() -> bool;
}

/// Check the global Accessibility permission.
pub fn accessibility_ok() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Check the "Input Monitoring" permission.
///
/// Returns `true` when the process is allowed to listen for keyboard events
/// through a CGEvent tap, and `false` otherwise.
pub fn input_monitoring_ok() -> bool {
    unsafe { CGPreflightListenEventAccess() }
}
