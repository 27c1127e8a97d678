//! Microsecond clock abstraction
//!
//! Arduino's `micros()` is a free-running counter that wraps after
//! 2^32 microseconds (about 71.6 minutes). Code built on it must compute
//! elapsed time with wrapping arithmetic.

/// One microsecond clock tick
pub type Ticks = u32;

/// Largest value the counter reaches before wrapping to 0
pub const MAX_TICKS: Ticks = Ticks::MAX;

/// Free-running microsecond counter
///
/// Implementations must be monotonic modulo wraparound, have a resolution
/// of at least one microsecond, and never block.
pub trait MicrosecondClock {
    /// Current counter value
    fn now(&mut self) -> Ticks;
}

impl<T: MicrosecondClock + ?Sized> MicrosecondClock for &mut T {
    fn now(&mut self) -> Ticks {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(Ticks);

    impl MicrosecondClock for Counter {
        fn now(&mut self) -> Ticks {
            self.0 = self.0.wrapping_add(1);
            self.0
        }
    }

    fn read_twice<C: MicrosecondClock>(mut clock: C) -> (Ticks, Ticks) {
        (clock.now(), clock.now())
    }

    #[test]
    fn test_borrowed_clock_advances_owner() {
        let mut counter = Counter(MAX_TICKS - 1);

        assert_eq!(read_twice(&mut counter), (MAX_TICKS, 0));
        assert_eq!(counter.now(), 1);
    }
}
