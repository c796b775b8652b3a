//! Controller configuration
//!
//! The controller has a single timing input: the period of the clock that
//! ticks it. Together with the refresh interval (how long each digit stays
//! lit) it fixes the refresh-count threshold at construction time.

use crate::refresh;

/// Time each digit stays selected before the scanner advances: 2 ms.
pub const DEFAULT_REFRESH_INTERVAL_NS: u64 = 2_000_000;

/// System clock of the reference board integration (50 MHz).
pub const DEFAULT_CLOCK_HZ: f64 = 50e6;

/// Construction-time configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Clock period is zero or negative.
    #[error("clock period must be positive, got {0} ns")]
    NonPositiveClockPeriod(f64),
    /// Clock period is NaN or infinite.
    #[error("clock period must be finite")]
    NonFiniteClockPeriod,
    /// Clock frequency is zero, negative, or not finite.
    #[error("clock frequency must be a positive finite value, got {0} Hz")]
    NonPositiveClockFrequency(f64),
    /// Refresh interval of zero nanoseconds.
    #[error("refresh interval must be at least 1 ns")]
    ZeroRefreshInterval,
}

/// Timing configuration for a [`DisplayController`](crate::DisplayController).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ControllerConfig {
    /// Period of the controller clock in nanoseconds (must be > 0).
    pub clock_period_ns: f64,
    /// Real time each digit stays selected, in nanoseconds.
    #[cfg_attr(feature = "serde", serde(default = "default_refresh_interval_ns"))]
    pub refresh_interval_ns: u64,
}

#[cfg(feature = "serde")]
fn default_refresh_interval_ns() -> u64 {
    DEFAULT_REFRESH_INTERVAL_NS
}

impl ControllerConfig {
    /// Configuration for a clock of `clock_period_ns` with the default 2 ms
    /// refresh interval. Validated when the controller is built.
    pub const fn new(clock_period_ns: f64) -> Self {
        Self {
            clock_period_ns,
            refresh_interval_ns: DEFAULT_REFRESH_INTERVAL_NS,
        }
    }

    /// Configuration for a clock of `hz` (period = 1e9 / hz).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveClockFrequency`] unless `hz` is a
    /// positive finite number.
    pub fn from_clock_hz(hz: f64) -> Result<Self, ConfigError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ConfigError::NonPositiveClockFrequency(hz));
        }
        Ok(Self::new(1e9 / hz))
    }

    /// Replace the refresh interval.
    #[must_use]
    pub const fn with_refresh_interval_ns(mut self, refresh_interval_ns: u64) -> Self {
        self.refresh_interval_ns = refresh_interval_ns;
        self
    }

    /// Check the configuration without building a controller.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-finite or non-positive clock period,
    /// or a zero refresh interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.clock_period_ns.is_finite() {
            return Err(ConfigError::NonFiniteClockPeriod);
        }
        if self.clock_period_ns <= 0.0 {
            return Err(ConfigError::NonPositiveClockPeriod(self.clock_period_ns));
        }
        if self.refresh_interval_ns == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }

    /// Counter threshold: `floor(refresh_interval_ns / clock_period_ns)`.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn refresh_count(&self) -> Result<u64, ConfigError> {
        self.validate()?;
        Ok(refresh::refresh_count(
            self.clock_period_ns,
            self.refresh_interval_ns,
        ))
    }

    /// Clock frequency in Hz implied by the period.
    pub fn clock_hz(&self) -> f64 {
        1e9 / self.clock_period_ns
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(1e9 / DEFAULT_CLOCK_HZ)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
