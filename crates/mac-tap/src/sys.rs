//! macOS event tap (CoreGraphics) integration.
//!
//! Why we use `core-graphics` for event taps:
//! - Some wrappers expose a Rust callback like `FnMut(..) -> Option<CGEvent>`,
//!   where returning `None` is meant to "swallow" the event. If the wrapper maps
//!   `None` to the original `CGEventRef` (instead of a NULL), the OS still delivers
//!   the keystroke. CoreGraphics only suppresses delivery if the tap returns NULL.
//! - The `core-graphics` crate's `CGEventTap` uses a `CallbackResult` where `Drop`
//!   maps to a NULL `CGEventRef` at the C boundary, matching CoreGraphics' contract.
//!   We return `CallbackResult::Drop` for suppressed hotkey events so they never
//!   reach the foreground app.

use std::{
    ffi::c_void,
    sync::{
        Arc,
        atomic::{AtomicPtr, Ordering},
    },
};

use core_foundation::{
    base::TCFType,
    mach_port::CFMachPortRef,
    runloop::{CFRunLoop, kCFRunLoopCommonModes},
};
use core_graphics::event::{self as cge, CallbackResult};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::{Disposition, EventHandler, Scancode, TapEvent, permissions};

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGEventTapEnable(tap: CFMachPortRef, enable: bool);
}

/// `kCGKeyboardEventKeycode`: the event field holding the hardware keycode.
const FIELD_KEYBOARD_EVENT_KEYCODE: u32 = 9;

/// `kCGEventFlagMaskAlternate`: the Option bit in the event flag field.
const OPTION_FLAG_MASK: u64 = 0x0008_0000;

/// Create the HID-level tap, register it on this thread's run loop, and park.
///
/// Every key-down, key-up, and flags-changed event is translated into a
/// [`TapEvent`] and offered to `handler`; a [`Disposition::Suppress`] answer
/// drops the physical event before other applications see it. The two
/// tap-disabled notifications (timeout, user input) re-enable the tap before
/// anything else is processed; without that, interception silently stops for
/// the rest of the process lifetime.
///
/// Returns only when the run loop exits, which for this process means never;
/// errors are all pre-loop (permission preflight, tap creation).
pub fn run_event_loop<H>(handler: H) -> crate::Result<()>
where
    H: EventHandler + 'static,
{
    // Preflight Input Monitoring permission.
    if !permissions::input_monitoring_ok() {
        warn!("input_monitoring_permission_missing");
        return Err(crate::Error::PermissionDenied("Input Monitoring"));
    }

    // Capture for re-enabling the tap from inside the closure.
    let tap_port_ptr: Arc<AtomicPtr<c_void>> = Arc::new(AtomicPtr::new(std::ptr::null_mut()));

    debug!("creating_event_tap");
    let tap_port_ptr_cb = tap_port_ptr.clone();
    // The tap callback is invoked serially on this thread's run loop, so the
    // lock is uncontended; it exists only to give the Fn closure a mutable
    // path to the handler.
    let handler = Mutex::new(handler);
    let tap = match cge::CGEventTap::new(
        cge::CGEventTapLocation::HID,
        cge::CGEventTapPlacement::HeadInsertEventTap,
        cge::CGEventTapOptions::Default,
        vec![
            cge::CGEventType::KeyDown,
            cge::CGEventType::KeyUp,
            cge::CGEventType::FlagsChanged,
        ],
        move |_proxy, etype, event| {
            match etype {
                cge::CGEventType::TapDisabledByTimeout
                | cge::CGEventType::TapDisabledByUserInput => {
                    let p = tap_port_ptr_cb.load(Ordering::SeqCst) as CFMachPortRef;
                    if !p.is_null() {
                        warn!("tap_disabled_by_os_reenabling");
                        unsafe { CGEventTapEnable(p, true) };
                    }
                    CallbackResult::Keep
                }
                cge::CGEventType::KeyDown
                | cge::CGEventType::KeyUp
                | cge::CGEventType::FlagsChanged => {
                    let option_held = event.get_flags().bits() & OPTION_FLAG_MASK != 0;
                    let ev = match etype {
                        cge::CGEventType::KeyDown => TapEvent::KeyDown {
                            scancode: event.get_integer_value_field(FIELD_KEYBOARD_EVENT_KEYCODE)
                                as Scancode,
                            option_held,
                        },
                        cge::CGEventType::KeyUp => TapEvent::KeyUp {
                            scancode: event.get_integer_value_field(FIELD_KEYBOARD_EVENT_KEYCODE)
                                as Scancode,
                        },
                        _ => TapEvent::FlagsChanged { option_held },
                    };
                    trace!(?ev, "tap_event");
                    match handler.lock().handle(ev) {
                        Disposition::Suppress => {
                            trace!("intercepting_event");
                            CallbackResult::Drop
                        }
                        Disposition::Forward => CallbackResult::Keep,
                    }
                }
                _ => CallbackResult::Keep,
            }
        },
    ) {
        Ok(t) => t,
        Err(_) => {
            warn!("event_tap_create_failed");
            return Err(crate::Error::EventTapStart);
        }
    };

    // Share the CFMachPort for re-enabling inside the callback.
    tap_port_ptr.store(
        tap.mach_port().as_concrete_TypeRef() as *mut c_void,
        Ordering::SeqCst,
    );

    // Create a runloop source and start the tap on this thread's runloop.
    let source = match tap.mach_port().create_runloop_source(0) {
        Ok(s) => s,
        Err(_) => {
            warn!("run_loop_source_create_failed");
            return Err(crate::Error::EventTapStart);
        }
    };

    let rl = CFRunLoop::get_current();
    let mode = unsafe { kCFRunLoopCommonModes };
    rl.add_source(&source, mode);

    // Enable the tap and run the loop.
    tap.enable();

    debug!("event_tap_started_run_loop");

    CFRunLoop::run_current();

    debug!("event_tap_exited");
    Ok(())
}
