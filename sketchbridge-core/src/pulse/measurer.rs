//! Timeout-bounded pulse measurement
//!
//! The measurement runs in two busy-wait phases:
//!
//! 1. Wait for the line to reach the target level. Bounded by the timeout.
//! 2. Time how long the line holds the target level.
//!
//! On the Arduino-compatible path ([`PulseMeasurer::measure`],
//! [`pulse_in`]) phase 2 has no bound: a line stuck at the target level
//! spins forever, exactly like `pulseIn()`. Callers that cannot rely on a
//! watchdog should use [`PulseMeasurer::try_measure`] with
//! [`PulseLimits::max_width`] set.

use core::hint::spin_loop;

use sketchbridge_hal::{DigitalLevelReader, LogicLevel, MicrosecondClock, Pin, Ticks};

use super::duration;

/// Timeout used when none is given (one second)
pub const DEFAULT_TIMEOUT_US: Ticks = 1_000_000;

/// Bounds for a single measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseLimits {
    /// Maximum ticks to wait for the pulse to start
    pub timeout: Ticks,
    /// Maximum pulse width before giving up, `None` for no limit
    pub max_width: Option<Ticks>,
}

impl Default for PulseLimits {
    fn default() -> Self {
        Self::compat(DEFAULT_TIMEOUT_US)
    }
}

impl PulseLimits {
    /// Limits matching `pulseIn()`: a start timeout and an unbounded width
    pub const fn compat(timeout: Ticks) -> Self {
        Self {
            timeout,
            max_width: None,
        }
    }

    /// Limits with both a start timeout and a width cap
    pub const fn bounded(timeout: Ticks, max_width: Ticks) -> Self {
        Self {
            timeout,
            max_width: Some(max_width),
        }
    }
}

/// Result of a measurement that keeps the failure cases apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseOutcome {
    /// Pulse of the given width in microseconds (may be 0)
    Measured(Ticks),
    /// The line never reached the target level within the timeout
    Timeout,
    /// The line was still at the target level after this many ticks,
    /// which exceeded [`PulseLimits::max_width`]
    Overrun(Ticks),
}

impl PulseOutcome {
    /// The value `pulseIn()` would return: the width, or 0 on any failure
    pub const fn to_compat(self) -> Ticks {
        match self {
            PulseOutcome::Measured(width) => width,
            PulseOutcome::Timeout | PulseOutcome::Overrun(_) => 0,
        }
    }

    /// Width of a completed pulse
    pub const fn as_measured(self) -> Option<Ticks> {
        match self {
            PulseOutcome::Measured(width) => Some(width),
            _ => None,
        }
    }
}

/// Pulse width measurer
///
/// Owns a level reader and a microsecond clock. Both may be borrowed
/// (`&mut reader`) since the HAL traits are implemented for mutable
/// references.
pub struct PulseMeasurer<R, C> {
    reader: R,
    clock: C,
}

impl<R: DigitalLevelReader, C: MicrosecondClock> PulseMeasurer<R, C> {
    /// Create a new measurer
    pub fn new(reader: R, clock: C) -> Self {
        Self { reader, clock }
    }

    /// Give back the reader and clock
    pub fn release(self) -> (R, C) {
        (self.reader, self.clock)
    }

    /// Measure a pulse with the default one second timeout
    ///
    /// Same as `measure_with_timeout(pin, level, DEFAULT_TIMEOUT_US)`.
    pub fn measure(&mut self, pin: Pin, level: LogicLevel) -> Ticks {
        self.measure_with_timeout(pin, level, DEFAULT_TIMEOUT_US)
    }

    /// Measure how long `pin` holds `level`, in microseconds
    ///
    /// Returns 0 if the line does not reach `level` within `timeout` ticks.
    /// A genuinely zero-length pulse also returns 0; use
    /// [`try_measure`](Self::try_measure) to tell the two apart.
    ///
    /// Once the pulse has started this blocks until it ends, with no limit.
    pub fn measure_with_timeout(&mut self, pin: Pin, level: LogicLevel, timeout: Ticks) -> Ticks {
        self.try_measure(pin, level, PulseLimits::compat(timeout)).to_compat()
    }

    /// Measure a pulse, reporting timeouts and overruns explicitly
    pub fn try_measure(
        &mut self,
        pin: Pin,
        level: LogicLevel,
        limits: PulseLimits,
    ) -> PulseOutcome {
        // Phase 1: skip over the opposite level until the pulse starts
        let start = self.clock.now();
        while self.reader.read(pin) == level.opposite() {
            if duration(start, self.clock.now()) > limits.timeout {
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "pulse on pin {} did not start within {} us",
                    pin.number(),
                    limits.timeout
                );
                return PulseOutcome::Timeout;
            }
            spin_loop();
        }

        // Phase 2: restart the clock at the edge, wait for the line to leave `level`
        let start = self.clock.now();
        while self.reader.read(pin) == level {
            if let Some(max_width) = limits.max_width {
                let elapsed = duration(start, self.clock.now());
                if elapsed > max_width {
                    #[cfg(feature = "defmt")]
                    defmt::debug!(
                        "pulse on pin {} still active after {} us",
                        pin.number(),
                        elapsed
                    );
                    return PulseOutcome::Overrun(elapsed);
                }
            }
            spin_loop();
        }
        let end = self.clock.now();

        PulseOutcome::Measured(duration(start, end))
    }
}

/// Arduino `pulseIn(pin, value, timeout)`
///
/// One-shot form of [`PulseMeasurer::measure_with_timeout`] for callers that
/// hold the reader and clock themselves.
pub fn pulse_in<R, C>(
    reader: &mut R,
    clock: &mut C,
    pin: Pin,
    level: LogicLevel,
    timeout: Ticks,
) -> Ticks
where
    R: DigitalLevelReader + ?Sized,
    C: MicrosecondClock + ?Sized,
{
    PulseMeasurer::new(reader, clock).measure_with_timeout(pin, level, timeout)
}
