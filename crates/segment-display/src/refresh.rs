//! Refresh timer
//!
//! Free-running counter that emits one `advance` pulse every
//! `refresh_count + 1` clock ticks. The comparison uses the registered count
//! entering the tick, so the pulse and the wrap to zero happen on the same
//! tick and the zeroed count is visible from the following one.

/// Counter threshold for a clock period and refresh interval.
///
/// `floor(refresh_interval_ns / clock_period_ns)`, truncating rather than
/// rounding. Saturates at `u64::MAX` for vanishingly small periods; callers
/// validate the period first (see [`ControllerConfig`](crate::ControllerConfig)).
#[allow(
    clippy::cast_precision_loss,      // intervals are far below 2^53 ns
    clippy::cast_possible_truncation, // `as` saturates on overflow and maps NaN to 0
    clippy::cast_sign_loss
)]
pub fn refresh_count(clock_period_ns: f64, refresh_interval_ns: u64) -> u64 {
    libm::floor(refresh_interval_ns as f64 / clock_period_ns) as u64
}

/// Refresh counter state plus its fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshTimer {
    refresh_count: u64,
    count: u64,
}

impl RefreshTimer {
    /// Timer in its reset state (`count == 0`).
    pub const fn new(refresh_count: u64) -> Self {
        Self {
            refresh_count,
            count: 0,
        }
    }

    /// Threshold fixed at construction.
    pub const fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Current registered count, always `<= refresh_count`.
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Whether the tick about to be evaluated emits an `advance` pulse.
    pub const fn fires_next_tick(&self) -> bool {
        self.count >= self.refresh_count
    }

    /// Ticks remaining up to and including the next pulse.
    pub const fn ticks_until_advance(&self) -> u64 {
        self.refresh_count.saturating_sub(self.count).saturating_add(1)
    }

    /// Evaluate one tick: returns the next state and whether `advance` fired.
    #[must_use]
    pub const fn next(self) -> (Self, bool) {
        if self.fires_next_tick() {
            (
                Self {
                    refresh_count: self.refresh_count,
                    count: 0,
                },
                true,
            )
        } else {
            (
                Self {
                    refresh_count: self.refresh_count,
                    count: self.count.saturating_add(1),
                },
                false,
            )
        }
    }

    /// Back to `count == 0`.
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
