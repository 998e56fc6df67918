//! Debounce state machine and event dispatcher.

use std::collections::HashSet;

use mac_tap::{Disposition, EventHandler, Scancode, TapEvent};
use tracing::{debug, trace};

use crate::{
    launch::LaunchQueue,
    mapping::MappingStore,
    slots::slot_of,
};

/// Decides, for every tap event, whether to fire a launch and whether the
/// physical keystroke should reach other applications.
///
/// `fired` holds the scancodes that already launched during the current
/// continuous Option-held interval; the interval ends (and the set empties)
/// on either Option edge or per-key on key-up. The struct is constructed on
/// and moved into the tap thread, which is the only caller of
/// [`EventHandler::handle`], so neither field needs synchronization.
pub struct Dispatcher {
    /// Current mapping, shared with the config loader.
    store: MappingStore,
    /// Producer side of the launch queue.
    queue: LaunchQueue,
    /// Keys that fired while Option has been held.
    fired: HashSet<Scancode>,
    /// Tracked Option state, used only to detect edges on flags-changed.
    option_down: bool,
}

impl Dispatcher {
    /// Create a dispatcher reading from `store` and enqueuing on `queue`.
    pub fn new(store: MappingStore, queue: LaunchQueue) -> Self {
        Self {
            store,
            queue,
            fired: HashSet::new(),
            option_down: false,
        }
    }
}

impl EventHandler for Dispatcher {
    fn handle(&mut self, event: TapEvent) -> Disposition {
        match event {
            TapEvent::FlagsChanged { option_held } => {
                // Either edge starts a fresh debounce interval; clearing on
                // both is idempotent and keeps the set scoped to one
                // continuous Option-held span.
                if option_held != self.option_down {
                    self.option_down = option_held;
                    self.fired.clear();
                }
                Disposition::Forward
            }
            TapEvent::KeyDown {
                scancode,
                option_held,
            } => {
                // The event's own flag field decides, not our tracked bool:
                // the flags-changed event for this very press may be ordered
                // behind the key-down.
                if !option_held {
                    return Disposition::Forward;
                }
                let Some(target) = self.store.lookup(scancode) else {
                    return Disposition::Forward;
                };
                if !self.fired.insert(scancode) {
                    trace!(scancode, "debounced_repeat");
                    return Disposition::Forward;
                }
                debug!(slot = slot_of(scancode), target = %target, "hotkey_fired");
                self.queue.enqueue(target);
                Disposition::Suppress
            }
            TapEvent::KeyUp { scancode } => {
                // Re-arm this key for the next press while Option stays held.
                self.fired.remove(&scancode);
                Disposition::Forward
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::Receiver;

    use super::*;
    use crate::{
        mapping::{LaunchTarget, MappingSnapshot},
        slots::SLOT_SCANCODES,
    };

    /// Dispatcher wired to a mapping built from `targets`, plus the queue's
    /// receiving end for asserting what got enqueued.
    fn dispatcher(targets: &[&str]) -> (Dispatcher, Receiver<LaunchTarget>) {
        let store = MappingStore::new();
        store.replace(MappingSnapshot::from_targets(
            targets.iter().copied().map(LaunchTarget::new),
        ));
        let (queue, rx) = LaunchQueue::new();
        (Dispatcher::new(store, queue), rx)
    }

    fn down(scancode: Scancode, option_held: bool) -> TapEvent {
        TapEvent::KeyDown {
            scancode,
            option_held,
        }
    }

    fn drain(rx: &Receiver<LaunchTarget>) -> Vec<String> {
        rx.try_iter().map(|t| t.as_str().to_string()).collect()
    }

    #[test]
    fn unmapped_key_is_forwarded_and_enqueues_nothing() {
        let (mut d, rx) = dispatcher(&["com.app.One", "com.app.Two"]);
        // Slot 3 has no target.
        assert_eq!(d.handle(down(SLOT_SCANCODES[2], true)), Disposition::Forward);
        // Neither does a key outside the row.
        assert_eq!(d.handle(down(0, true)), Disposition::Forward);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn key_down_without_option_is_forwarded() {
        let (mut d, rx) = dispatcher(&["com.app.One"]);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], false)),
            Disposition::Forward
        );
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn first_press_fires_once_and_suppresses() {
        let (mut d, rx) = dispatcher(&["com.app.One", "com.app.Two"]);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        // Auto-repeats while held are forwarded and fire nothing.
        assert_eq!(d.handle(down(SLOT_SCANCODES[0], true)), Disposition::Forward);
        assert_eq!(d.handle(down(SLOT_SCANCODES[0], true)), Disposition::Forward);
        assert_eq!(drain(&rx), vec!["com.app.One"]);
    }

    #[test]
    fn key_up_rearms_the_key() {
        let (mut d, rx) = dispatcher(&["com.app.One"]);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        assert_eq!(
            d.handle(TapEvent::KeyUp {
                scancode: SLOT_SCANCODES[0]
            }),
            Disposition::Forward
        );
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        assert_eq!(drain(&rx), vec!["com.app.One", "com.app.One"]);
    }

    #[test]
    fn option_release_clears_all_debounce_state() {
        let (mut d, rx) = dispatcher(&["com.app.One"]);
        assert_eq!(d.handle(TapEvent::FlagsChanged { option_held: true }), Disposition::Forward);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        // No key-up: release and re-press Option instead.
        assert_eq!(d.handle(TapEvent::FlagsChanged { option_held: false }), Disposition::Forward);
        assert_eq!(d.handle(TapEvent::FlagsChanged { option_held: true }), Disposition::Forward);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        assert_eq!(drain(&rx), vec!["com.app.One", "com.app.One"]);
    }

    #[test]
    fn key_down_flag_field_wins_over_tracked_state() {
        let (mut d, rx) = dispatcher(&["com.app.One"]);
        // The dispatcher last heard Option was up, but the key-down event
        // itself carries the Option bit: the event wins.
        assert_eq!(d.handle(TapEvent::FlagsChanged { option_held: false }), Disposition::Forward);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        assert_eq!(drain(&rx), vec!["com.app.One"]);
    }

    #[test]
    fn duplicate_flags_events_are_harmless() {
        let (mut d, rx) = dispatcher(&["com.app.One"]);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        // Same-state flags event (e.g. another modifier toggled) must not
        // reset the interval.
        assert_eq!(d.handle(TapEvent::FlagsChanged { option_held: true }), Disposition::Forward);
        assert_eq!(d.handle(down(SLOT_SCANCODES[0], true)), Disposition::Forward);
        assert_eq!(drain(&rx), vec!["com.app.One"]);
    }

    #[test]
    fn two_line_config_scenario() {
        // Lines "com.app.One", "com.app.Two": slots 1 and 2 map, 3..9 do not.
        let (mut d, rx) = dispatcher(&["com.app.One", "com.app.Two"]);
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[1], true)),
            Disposition::Suppress
        );
        assert_eq!(d.handle(down(SLOT_SCANCODES[2], true)), Disposition::Forward);
        assert_eq!(drain(&rx), vec!["com.app.Two"]);
    }

    #[test]
    fn reload_takes_effect_between_events() {
        let store = MappingStore::new();
        store.replace(MappingSnapshot::from_targets([LaunchTarget::new(
            "com.app.Old",
        )]));
        let (queue, rx) = LaunchQueue::new();
        let mut d = Dispatcher::new(store.clone(), queue);

        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        store.replace(MappingSnapshot::from_targets([LaunchTarget::new(
            "com.app.New",
        )]));
        d.handle(TapEvent::KeyUp {
            scancode: SLOT_SCANCODES[0],
        });
        assert_eq!(
            d.handle(down(SLOT_SCANCODES[0], true)),
            Disposition::Suppress
        );
        assert_eq!(drain(&rx), vec!["com.app.Old", "com.app.New"]);
    }
}
