//! Externally written display value
//!
//! The packed value is owned by whatever configuration interface exposes it
//! (a CSR on a register bus, a debug bridge, a test bench). The controller
//! only ever reads it, once per tick. Reads and writes move the whole value
//! at once, so a tick never observes a partially updated register.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::NIBBLE_BITS;

/// Register write errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Value has bits set above the register width.
    #[error("value {value:#x} does not fit in {width_bits} bits")]
    ValueTooWide {
        /// Rejected value.
        value: u32,
        /// Register width.
        width_bits: u32,
    },
}

/// Named packed value holding one 4-bit field per digit.
///
/// Shared by reference: the writer and the controller both hold
/// `&ValueRegister`.
#[derive(Debug)]
pub struct ValueRegister<const DIGITS: usize> {
    name: &'static str,
    bits: AtomicU32,
}

impl<const DIGITS: usize> ValueRegister<DIGITS> {
    /// Width of the register: four bits per digit.
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)] // DIGITS <= 8
    pub const WIDTH_BITS: u32 = DIGITS as u32 * NIBBLE_BITS;

    /// Mask of the implemented bits.
    #[allow(clippy::arithmetic_side_effects)] // WIDTH_BITS in 4..=32
    pub const MASK: u32 = if Self::WIDTH_BITS >= u32::BITS {
        u32::MAX
    } else {
        (1 << Self::WIDTH_BITS) - 1
    };

    /// Register named `name`, reset to 0.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            bits: AtomicU32::new(0),
        }
    }

    /// Name under which the register is exposed.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Width of the register in bits.
    pub const fn width_bits(&self) -> u32 {
        Self::WIDTH_BITS
    }

    /// Mask of the implemented bits.
    pub const fn mask(&self) -> u32 {
        Self::MASK
    }

    /// Current value.
    pub fn read(&self) -> u32 {
        self.bits.load(Ordering::Acquire)
    }

    /// Store `value`, dropping bits above the register width like a CSR does.
    pub fn write(&self, value: u32) {
        let masked = value & Self::MASK;
        if masked != value {
            tracing::debug!(
                register = self.name,
                value,
                masked,
                "register write truncated"
            );
        } else {
            tracing::debug!(register = self.name, value, "register write");
        }
        self.bits.store(masked, Ordering::Release);
    }

    /// Store `value`, rejecting it if it does not fit.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::ValueTooWide`] if `value` has bits set above
    /// the register width; the register is left unchanged.
    pub fn try_write(&self, value: u32) -> Result<(), RegisterError> {
        if value & !Self::MASK != 0 {
            return Err(RegisterError::ValueTooWide {
                value,
                width_bits: Self::WIDTH_BITS,
            });
        }
        self.write(value);
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_register_starts_at_zero() {
        let reg = ValueRegister::<3>::new("value");
        assert_eq!(reg.read(), 0);
        assert_eq!(reg.name(), "value");
    }

    #[test]
    fn test_width_and_mask() {
        assert_eq!(ValueRegister::<3>::WIDTH_BITS, 12);
        assert_eq!(ValueRegister::<3>::MASK, 0xFFF);
        assert_eq!(ValueRegister::<8>::MASK, u32::MAX);
        assert_eq!(ValueRegister::<1>::MASK, 0xF);
    }

    #[test]
    fn test_write_truncates_to_width() {
        let reg = ValueRegister::<3>::new("value");
        reg.write(0x1ABC);
        assert_eq!(reg.read(), 0xABC);
    }

    #[test]
    fn test_try_write_rejects_wide_value() {
        let reg = ValueRegister::<3>::new("value");
        reg.write(0x123);
        assert_eq!(
            reg.try_write(0x1000),
            Err(RegisterError::ValueTooWide {
                value: 0x1000,
                width_bits: 12
            })
        );
        assert_eq!(reg.read(), 0x123, "rejected write must not modify register");
        assert_eq!(
            reg.try_write(0x1000).unwrap_err().to_string(),
            "value 0x1000 does not fit in 12 bits"
        );
        assert_eq!(reg.try_write(0xFFF), Ok(()));
        assert_eq!(reg.read(), 0xFFF);
    }

    #[test]
    fn test_concurrent_writer_never_tears() {
        let reg = ValueRegister::<3>::new("value");
        std::thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..1_000 {
                    reg.write(0xAAA);
                    reg.write(0x555);
                }
            });
            for _ in 0..1_000 {
                let v = reg.read();
                assert!(v == 0 || v == 0xAAA || v == 0x555, "torn read {v:#x}");
            }
        });
    }
}
