//! Pulse width measurement
//!
//! Implements Arduino's `pulseIn()`: wait for a line to reach a level, then
//! time how long it stays there, using the free-running microsecond clock.

mod duration;
mod measurer;

pub use duration::duration;
pub use measurer::{pulse_in, PulseLimits, PulseMeasurer, PulseOutcome, DEFAULT_TIMEOUT_US};
