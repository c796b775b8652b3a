//! Digit scanner
//!
//! One-hot rotating state over `DIGITS` digit lines. Reset selects bit 0.
//! Each `advance` pulse moves the set bit one position toward bit 0, with
//! bit 0 wrapping to the top line. For three digits the cycle is
//! `001 -> 100 -> 010 -> 001`.

use crate::MAX_DIGITS;

/// Rotating one-hot digit-select state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitScanner<const DIGITS: usize> {
    one_hot: u8,
}

impl<const DIGITS: usize> DigitScanner<DIGITS> {
    const VALID: () = assert!(
        DIGITS >= 1 && DIGITS <= MAX_DIGITS,
        "digit count must be between 1 and 8"
    );

    /// One-hot value of the highest digit line.
    #[allow(clippy::arithmetic_side_effects)] // compile-time; DIGITS >= 1
    pub const TOP: u8 = 1 << (DIGITS - 1);

    /// Scanner in its reset state: bit 0 selected.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID;
        Self { one_hot: 1 }
    }

    /// Current digit-select lines (exactly one bit set).
    pub const fn one_hot(self) -> u8 {
        self.one_hot
    }

    /// Bit position of the active digit line, in `0..DIGITS`.
    pub const fn index(self) -> usize {
        self.one_hot.trailing_zeros() as usize
    }

    /// Which field of the packed value the active digit shows
    /// (0 = least significant nibble). Line `i` shows field `DIGITS - 1 - i`.
    pub const fn field(self) -> usize {
        DIGITS.saturating_sub(1).saturating_sub(self.index())
    }

    /// Evaluate one tick: rotate on `advance`, hold otherwise.
    #[must_use]
    pub const fn next(self, advance: bool) -> Self {
        if !advance {
            return self;
        }
        if self.one_hot & 1 == 1 {
            Self { one_hot: Self::TOP }
        } else {
            Self {
                one_hot: self.one_hot >> 1,
            }
        }
    }

    /// Returns `true` if `bits` is one of the `DIGITS` valid one-hot values.
    pub const fn is_valid_one_hot(bits: u8) -> bool {
        bits.count_ones() == 1 && bits <= Self::TOP
    }

    /// Back to the reset state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<const DIGITS: usize> Default for DigitScanner<DIGITS> {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
