//! Display controller
//!
//! Composes the refresh timer, digit scanner, nibble selector and decoder.
//! Per tick, in order:
//!
//! 1. the refresh timer counts and decides whether `advance` fires;
//! 2. the scanner rotates if it did;
//! 3. both updates are committed together.
//!
//! The outputs are combinational: `digit_select` is the committed scanner
//! state and `segments` decodes the field that state selects from the live
//! register. A register write therefore shows up without waiting for a tick.

use crate::config::{ConfigError, ControllerConfig};
use crate::decoder::{decode, Nibble, SegmentPattern};
use crate::refresh::RefreshTimer;
use crate::register::ValueRegister;
use crate::scanner::DigitScanner;
use crate::selector::select;

/// The reference three-digit, 12-bit controller.
pub type TripleDigitController<'r> = DisplayController<'r, 3>;

/// Levels driven on the display pins.
///
/// Serialize-only: `digit_select` is one-hot over a digit count the type
/// does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DisplayOutputs {
    /// Digit-select lines, one-hot, active-high.
    pub digit_select: u8,
    /// Segment lines of the selected digit, active-low.
    pub segments: SegmentPattern,
}

/// Result of evaluating one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Outputs during the tick, from the state entering it.
    pub outputs: DisplayOutputs,
    /// Whether the refresh timer fired (and the scanner rotated).
    pub advance: bool,
}

/// Every registered bit of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState<const DIGITS: usize> {
    timer: RefreshTimer,
    scanner: DigitScanner<DIGITS>,
}

impl<const DIGITS: usize> ControllerState<DIGITS> {
    /// Reset state for a refresh threshold.
    pub const fn new(refresh_count: u64) -> Self {
        Self {
            timer: RefreshTimer::new(refresh_count),
            scanner: DigitScanner::new(),
        }
    }

    /// Refresh timer state.
    pub const fn timer(&self) -> RefreshTimer {
        self.timer
    }

    /// Digit scanner state.
    pub const fn scanner(&self) -> DigitScanner<DIGITS> {
        self.scanner
    }

    /// Field the active digit displays, read from `value`.
    ///
    /// An impossible scanner state drives nibble 0, the value an unmatched
    /// case leaves on the selector output.
    pub fn nibble(&self, value: u32) -> Nibble {
        select::<DIGITS>(self.scanner.one_hot(), value).unwrap_or_default()
    }

    /// Combinational outputs for this state and register value.
    pub fn outputs(&self, value: u32) -> DisplayOutputs {
        DisplayOutputs {
            digit_select: self.scanner.one_hot(),
            segments: decode(self.nibble(value)),
        }
    }

    /// Evaluate one tick against `value`.
    ///
    /// Both registers update from the state entering the tick; the returned
    /// outputs are the ones driven during it.
    #[must_use]
    pub fn step(self, value: u32) -> (Self, Tick) {
        let outputs = self.outputs(value);
        let (timer, advance) = self.timer.next();
        let scanner = self.scanner.next(advance);
        (Self { timer, scanner }, Tick { outputs, advance })
    }
}

/// Multiplexed display controller reading a shared [`ValueRegister`].
#[derive(Debug, Clone)]
pub struct DisplayController<'r, const DIGITS: usize> {
    state: ControllerState<DIGITS>,
    register: &'r ValueRegister<DIGITS>,
    cycle: u64,
}

impl<'r, const DIGITS: usize> DisplayController<'r, DIGITS> {
    /// Build a controller in its reset state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the clock period is not a positive finite
    /// number or the refresh interval is zero.
    pub fn new(
        config: &ControllerConfig,
        register: &'r ValueRegister<DIGITS>,
    ) -> Result<Self, ConfigError> {
        let refresh_count = config.refresh_count()?;
        tracing::debug!(
            digits = DIGITS,
            clock_period_ns = config.clock_period_ns,
            refresh_interval_ns = config.refresh_interval_ns,
            refresh_count,
            register = register.name(),
            "display controller built"
        );
        Ok(Self {
            state: ControllerState::new(refresh_count),
            register,
            cycle: 0,
        })
    }

    /// Evaluate one clock tick. Returns `true` if the scanner advanced.
    pub fn tick(&mut self) -> bool {
        self.step().advance
    }

    /// Evaluate one clock tick and return the outputs driven during it
    /// (from the state entering the tick) along with the advance pulse.
    pub fn step(&mut self) -> Tick {
        let (state, tick) = self.state.step(self.register.read());
        self.state = state;
        self.cycle = self.cycle.wrapping_add(1);
        if tick.advance {
            tracing::trace!(
                cycle = self.cycle,
                digit_select = self.state.scanner().one_hot(),
                "digit advance"
            );
        }
        tick
    }

    /// Evaluate `ticks` clock ticks. Returns the number of advances.
    pub fn run(&mut self, ticks: u64) -> u64 {
        let mut advances: u64 = 0;
        for _ in 0..ticks {
            if self.tick() {
                advances = advances.saturating_add(1);
            }
        }
        advances
    }

    /// Back to the reset state. The register is not touched.
    pub fn reset(&mut self) {
        self.state = ControllerState::new(self.state.timer().refresh_count());
        self.cycle = 0;
    }

    /// Current pin levels.
    pub fn outputs(&self) -> DisplayOutputs {
        self.state.outputs(self.register.read())
    }

    /// Digit-select lines.
    pub fn digit_select(&self) -> u8 {
        self.state.scanner().one_hot()
    }

    /// Segment lines.
    pub fn segments(&self) -> SegmentPattern {
        self.outputs().segments
    }

    /// Field currently routed to the decoder.
    pub fn nibble(&self) -> Nibble {
        self.state.nibble(self.register.read())
    }

    /// Bit position of the active digit line.
    pub fn digit_index(&self) -> usize {
        self.state.scanner().index()
    }

    /// Counter threshold derived from the configuration.
    pub fn refresh_count(&self) -> u64 {
        self.state.timer().refresh_count()
    }

    /// Ticks evaluated since construction or the last reset.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Registered state.
    pub fn state(&self) -> ControllerState<DIGITS> {
        self.state
    }

    /// Register the controller reads.
    pub fn register(&self) -> &'r ValueRegister<DIGITS> {
        self.register
    }

    /// What every digit line shows for the current register value.
    ///
    /// Element `i` is the pattern line `i` carries when selected. Line 0
    /// shows the most significant field, so the array reads left to right.
    pub fn snapshot(&self) -> [SegmentPattern; DIGITS] {
        let value = self.register.read();
        core::array::from_fn(|line| {
            u32::try_from(line)
                .ok()
                .and_then(|line| 1u8.checked_shl(line))
                .and_then(|one_hot| select::<DIGITS>(one_hot, value))
                .map_or(SegmentPattern::BLANK, decode)
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
