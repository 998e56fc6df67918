//! The fixed hotkey row: the nine digit keys bound to slots 1..9.

use mac_tap::Scancode;

/// Hardware virtual keycodes (`kVK_ANSI_1` .. `kVK_ANSI_9`) for the digit
/// row, in slot order. Note the kVK values are not contiguous or ordered;
/// this array is the single source of slot ordering.
pub const SLOT_SCANCODES: [Scancode; 9] = [18, 19, 20, 21, 23, 22, 26, 28, 25];

/// 1-based slot number for a scancode, if it belongs to the hotkey row.
pub fn slot_of(scancode: Scancode) -> Option<usize> {
    SLOT_SCANCODES.iter().position(|&s| s == scancode).map(|i| i + 1)
}
