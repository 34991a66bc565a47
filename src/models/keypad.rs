//! Physical keypad tables.
//!
//! The matrix keypad reports presses as key characters, one per logical
//! button. Buttons are numbered 1..=24; the key alphabet is indexed by
//! `num - 1`.

/// Number of buttons on the keypad.
pub const BUTTON_COUNT: u8 = 24;

/// Key characters reported by the matrix keypad, indexed by `num - 1`.
pub const KEY_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWX";

/// Columns in the physical grid.
pub const GRID_COLS: usize = 6;

/// Logical button number at each physical position, row-major from the top left.
///
/// Only the keypad map renderer reads this table; fragment synthesis works
/// purely from `num`.
pub const BUTTON_NUMBERS: [u8; BUTTON_COUNT as usize] = [
    19, 20, 21, 22, 23, 24, //
    13, 14, 15, 16, 17, 18, //
    7, 8, 9, 10, 11, 12, //
    1, 2, 3, 4, 5, 6,
];

/// Returns the key character for a button number.
///
/// # Panics
///
/// Panics when `num` is outside `1..=24`. Callers validate first; an
/// out-of-range number must never be wrapped onto another key.
#[must_use]
pub fn key_for(num: u8) -> char {
    char::from(KEY_ALPHABET.as_bytes()[usize::from(num) - 1])
}

/// Returns true if `num` addresses a physical button.
#[must_use]
pub const fn is_valid_button(num: u8) -> bool {
    num >= 1 && num <= BUTTON_COUNT
}

/// Returns the logical button number at a physical (row, col) position.
#[must_use]
pub fn button_at(row: usize, col: usize) -> Option<u8> {
    if col >= GRID_COLS {
        return None;
    }
    BUTTON_NUMBERS.get(row * GRID_COLS + col).copied()
}
