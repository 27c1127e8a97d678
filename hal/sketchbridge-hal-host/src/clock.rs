//! Microsecond clock from the OS monotonic timer
//!
//! The timer is truncated to 32 bits so the counter wraps every
//! 2^32 µs, exactly like `micros()` on a microcontroller. Code that is
//! correct on the board is then correct here too, and vice versa.
//!
//! Delays sleep for the bulk of the wait and spin for the last stretch, so
//! short delays stay accurate despite the scheduler's granularity.

use core::hint::spin_loop;
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use sketchbridge_hal::{MicrosecondClock, Ticks};

/// Final part of a delay that is spun instead of slept
const SPIN_MARGIN: Duration = Duration::from_millis(2);

/// Process-wide time origin, fixed on first use
static EPOCH: OnceLock<Instant> = OnceLock::new();

fn epoch() -> Instant {
    *EPOCH.get_or_init(Instant::now)
}

/// Arduino `micros()`: microseconds since the process first asked
pub fn micros() -> Ticks {
    truncate(epoch().elapsed().as_micros())
}

/// Arduino `millis()`: milliseconds since the same origin as [`micros`]
pub fn millis() -> u32 {
    truncate(epoch().elapsed().as_millis())
}

/// Arduino `delay()`
pub fn delay(ms: u32) {
    wait(Duration::from_millis(ms as u64));
}

/// Arduino `delayMicroseconds()`
pub fn delay_microseconds(us: u32) {
    wait(Duration::from_micros(us as u64));
}

fn truncate(count: u128) -> u32 {
    // Keep the low 32 bits: the counter wraps
    count as u32
}

/// Block for at least `span`
fn wait(span: Duration) {
    let deadline = Instant::now() + span;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if left <= SPIN_MARGIN {
            break;
        }
        thread::sleep(left - SPIN_MARGIN);
    }
    while Instant::now() < deadline {
        spin_loop();
    }
}

/// Monotonic microsecond clock
///
/// Clocks created with [`HostClock::new`] share the process epoch and agree
/// with [`micros`]. [`HostClock::starting_at`] starts a private counter at a
/// chosen value, e.g. just before the wrap.
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    origin: Instant,
    offset: Ticks,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    /// Clock on the process-wide epoch
    pub fn new() -> Self {
        Self {
            origin: epoch(),
            offset: 0,
        }
    }

    /// Clock that reads `ticks` now and counts up from there
    pub fn starting_at(ticks: Ticks) -> Self {
        Self {
            origin: Instant::now(),
            offset: ticks,
        }
    }
}

impl MicrosecondClock for HostClock {
    fn now(&mut self) -> Ticks {
        self.offset.wrapping_add(truncate(self.origin.elapsed().as_micros()))
    }
}

impl DelayNs for HostClock {
    fn delay_ns(&mut self, ns: u32) {
        wait(Duration::from_nanos(ns as u64));
    }
}
