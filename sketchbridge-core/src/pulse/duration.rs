//! Elapsed time over a wrapping counter

use sketchbridge_hal::Ticks;

/// Ticks elapsed between two clock readings
///
/// Correct across a single counter wraparound: when `end` is numerically
/// smaller than `start`, the count runs from `start` up to `MAX_TICKS`,
/// through 0, and on to `end`. Multiple wraps between the two readings are
/// indistinguishable from one.
///
/// The result is the true modular elapsed count, so the step from
/// `MAX_TICKS` to 0 counts as one tick: `duration(MAX_TICKS - 5, 10)` is 16,
/// not the 15 that `(MAX_TICKS - start) + end` would give.
pub const fn duration(start: Ticks, end: Ticks) -> Ticks {
    end.wrapping_sub(start)
}
