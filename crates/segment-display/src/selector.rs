//! Nibble selector
//!
//! Combinational multiplexer from the active digit line to the 4-bit field
//! it displays. Line `i` shows field `DIGITS - 1 - i`, so for three digits:
//!
//! | one-hot | bits of value |
//! |---------|---------------|
//! | `100`   | `[0, 4)`      |
//! | `010`   | `[4, 8)`      |
//! | `001`   | `[8, 12)`     |

use crate::decoder::Nibble;
use crate::scanner::DigitScanner;
use crate::NIBBLE_BITS;

/// Extract the field selected by `digit_one_hot` from `value`.
///
/// Returns `None` for anything other than one of the `DIGITS` one-hot values.
/// The scanner never produces such a value; debug builds assert on it.
pub fn select<const DIGITS: usize>(digit_one_hot: u8, value: u32) -> Option<Nibble> {
    debug_assert!(
        DigitScanner::<DIGITS>::is_valid_one_hot(digit_one_hot),
        "digit select {digit_one_hot:#b} is not one-hot over {DIGITS} lines"
    );
    if !DigitScanner::<DIGITS>::is_valid_one_hot(digit_one_hot) {
        return None;
    }
    let line = digit_one_hot.trailing_zeros();
    // DIGITS <= 8 and line < DIGITS, so the shift stays below 32
    #[allow(clippy::cast_possible_truncation)]
    let field = (DIGITS as u32).checked_sub(1)?.checked_sub(line)?;
    let shift = field.checked_mul(NIBBLE_BITS)?;
    Some(Nibble::from_low_bits(value.checked_shr(shift)?))
}

/// Extract field `field` (0 = least significant) directly.
pub fn field(value: u32, field: usize) -> Option<Nibble> {
    let shift = u32::try_from(field).ok()?.checked_mul(NIBBLE_BITS)?;
    Some(Nibble::from_low_bits(value.checked_shr(shift)?))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
