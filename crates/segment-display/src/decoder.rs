//! 4-bit to seven-segment decoder
//!
//! Pure combinational mapping from a [`Nibble`] to the [`SegmentPattern`] that
//! lights it as a hexadecimal glyph. Polarity is active-low: a `0` bit lights
//! the segment.
//!
//! Segment layout:
//! ```text
//!    aaaa
//!   f    b
//!   f    b
//!    gggg
//!   e    c
//!   e    c
//!    dddd
//! ```
//!
//! Bit 0 of the pattern drives segment `a` and bit 6 drives segment `g`, so a
//! pattern printed most-significant bit first reads `gfedcba`.

use core::fmt;

// ── Nibble ───────────────────────────────────────────────────────────────────

/// Error returned when a value does not fit in four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {0:#x} does not fit in a nibble")]
pub struct NibbleOutOfRange(pub u8);

/// Error returned when raw drive bits use bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("pattern {0:#04x} has bits set above the seven segment lines")]
pub struct PatternOutOfRange(pub u8);

/// A 4-bit field extracted from the packed display value.
///
/// Wraps a `u8` with the invariant `value <= 0xF`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(transparent)]
pub struct Nibble(u8);

impl Nibble {
    /// Mask of the valid bits.
    pub const MASK: u8 = 0x0F;

    /// Create a `Nibble`, returning an error if `value > 0xF`.
    ///
    /// # Errors
    ///
    /// Returns [`NibbleOutOfRange`] if `value > 0xF`.
    pub const fn new(value: u8) -> Result<Self, NibbleOutOfRange> {
        if value > Self::MASK {
            Err(NibbleOutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Keep the low four bits of `value`.
    #[allow(clippy::cast_possible_truncation)] // masked to 4 bits first
    pub const fn from_low_bits(value: u32) -> Self {
        Self((value & 0xF) as u8)
    }

    /// Return the nibble value (0–15).
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Nibble {
    type Error = NibbleOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nibble> for u8 {
    fn from(value: Nibble) -> Self {
        value.0
    }
}

// ── Segments ─────────────────────────────────────────────────────────────────

/// One of the seven LED segments of a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    /// Top horizontal
    A,
    /// Top right vertical
    B,
    /// Bottom right vertical
    C,
    /// Bottom horizontal
    D,
    /// Bottom left vertical
    E,
    /// Top left vertical
    F,
    /// Middle horizontal
    G,
}

impl Segment {
    /// All segments in bit order (`a` is bit 0).
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    /// Bit position of this segment in a [`SegmentPattern`].
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// 7-bit active-low segment drive pattern for one digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(transparent)]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// Mask of the seven segment bits.
    pub const MASK: u8 = 0x7F;

    /// Every segment dark.
    pub const BLANK: Self = Self(Self::MASK);

    /// Build a pattern from raw drive bits; bit 7 is discarded.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Raw drive bits (`0` = lit).
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if `segment` is lit (its drive bit is low).
    pub const fn is_lit(self, segment: Segment) -> bool {
        (self.0 >> segment.bit()) & 1 == 0
    }

    /// Number of lit segments.
    pub const fn lit_count(self) -> u32 {
        (!self.0 & Self::MASK).count_ones()
    }
}

impl TryFrom<u8> for SegmentPattern {
    type Error = PatternOutOfRange;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !Self::MASK != 0 {
            return Err(PatternOutOfRange(bits));
        }
        Ok(Self(bits))
    }
}

impl From<SegmentPattern> for u8 {
    fn from(pattern: SegmentPattern) -> Self {
        pattern.0
    }
}

impl Default for SegmentPattern {
    fn default() -> Self {
        Self::BLANK
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07b}", self.0)
    }
}

/// Decode a nibble into its segment pattern.
///
/// Total over all sixteen inputs.
pub const fn decode(nibble: Nibble) -> SegmentPattern {
    let bits = match nibble.get() {
        0x0 => 0b100_0000,
        0x1 => 0b111_1001,
        0x2 => 0b010_0100,
        0x3 => 0b011_0000,
        0x4 => 0b001_1001,
        0x5 => 0b001_0010,
        0x6 => 0b000_0010,
        0x7 => 0b111_1000,
        0x8 => 0b000_0000,
        0x9 => 0b001_0000,
        0xA => 0b000_1000,
        0xB => 0b000_0011,
        0xC => 0b100_0110,
        0xD => 0b010_0001,
        0xE => 0b000_0110,
        // Nibble invariant: only 0xF remains
        _ => 0b000_1110,
    };
    SegmentPattern(bits)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const EXPECTED: [(u8, &str); 16] = [
        (0x0, "1000000"),
        (0x1, "1111001"),
        (0x2, "0100100"),
        (0x3, "0110000"),
        (0x4, "0011001"),
        (0x5, "0010010"),
        (0x6, "0000010"),
        (0x7, "1111000"),
        (0x8, "0000000"),
        (0x9, "0010000"),
        (0xa, "0001000"),
        (0xb, "0000011"),
        (0xc, "1000110"),
        (0xd, "0100001"),
        (0xe, "0000110"),
        (0xf, "0001110"),
    ];

    #[test]
    fn test_decode_matches_table_for_every_nibble() {
        for (value, pattern) in EXPECTED {
            let decoded = decode(Nibble::new(value).unwrap());
            assert_eq!(
                decoded.to_string(),
                pattern,
                "nibble {value:#x} decoded to the wrong pattern"
            );
        }
    }

    #[test]
    fn test_eight_lights_every_segment() {
        let eight = decode(Nibble::new(8).unwrap());
        assert_eq!(eight.lit_count(), 7);
        assert!(Segment::ALL.iter().all(|s| eight.is_lit(*s)));
    }

    #[test]
    fn test_one_lights_b_and_c_only() {
        let one = decode(Nibble::new(1).unwrap());
        assert!(one.is_lit(Segment::B));
        assert!(one.is_lit(Segment::C));
        assert_eq!(one.lit_count(), 2);
    }

    #[test]
    fn test_zero_leaves_middle_dark() {
        let zero = decode(Nibble::new(0).unwrap());
        assert!(!zero.is_lit(Segment::G));
        assert_eq!(zero.lit_count(), 6);
    }

    #[test]
    fn test_nibble_rejects_values_over_15() {
        assert_eq!(Nibble::new(0x10), Err(NibbleOutOfRange(0x10)));
        assert!(Nibble::new(0xFF).is_err());
        assert!(Nibble::new(0xF).is_ok());
    }

    #[test]
    fn test_nibble_from_low_bits_masks() {
        assert_eq!(Nibble::from_low_bits(0xABC).get(), 0xC);
        assert_eq!(Nibble::from_low_bits(0xF0).get(), 0);
    }

    #[test]
    fn test_pattern_try_from_rejects_bit_7() {
        assert_eq!(SegmentPattern::try_from(0x80), Err(PatternOutOfRange(0x80)));
        assert_eq!(SegmentPattern::try_from(0xFF), Err(PatternOutOfRange(0xFF)));
        assert_eq!(SegmentPattern::try_from(0x7F), Ok(SegmentPattern::BLANK));
        assert_eq!(u8::from(decode(Nibble::new(0).unwrap())), 0b100_0000);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            NibbleOutOfRange(0x10).to_string(),
            "value 0x10 does not fit in a nibble"
        );
        assert_eq!(
            PatternOutOfRange(0xFF).to_string(),
            "pattern 0xff has bits set above the seven segment lines"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_pattern_deserialize_checks_width() {
        let pattern: SegmentPattern = serde_json::from_str("64").unwrap();
        assert_eq!(pattern.to_string(), "1000000");
        assert_eq!(serde_json::to_string(&pattern).unwrap(), "64");
        assert!(serde_json::from_str::<SegmentPattern>("255").is_err());
        assert!(serde_json::from_str::<SegmentPattern>("128").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_nibble_deserialize_checks_range() {
        assert_eq!(serde_json::from_str::<Nibble>("15").unwrap().get(), 15);
        assert!(serde_json::from_str::<Nibble>("16").is_err());
    }

    #[test]
    fn test_pattern_from_bits_drops_bit_7() {
        assert_eq!(SegmentPattern::from_bits(0xFF), SegmentPattern::BLANK);
        assert_eq!(SegmentPattern::BLANK.lit_count(), 0);
    }
}
