//! Digital I/O abstractions
//!
//! Arduino code passes pins and levels around as bare integers. Here a pin
//! is a [`Pin`] handle and a level is the closed [`LogicLevel`] enum, so a
//! level cannot be passed where a pin is expected.

use core::ops::Not;

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicLevel {
    /// Logic 0 (Arduino `LOW`)
    Low,
    /// Logic 1 (Arduino `HIGH`)
    High,
}

impl LogicLevel {
    /// The other level
    pub const fn opposite(self) -> Self {
        match self {
            LogicLevel::Low => LogicLevel::High,
            LogicLevel::High => LogicLevel::Low,
        }
    }

    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, LogicLevel::High)
    }

    /// Check if this is the low level
    pub const fn is_low(self) -> bool {
        matches!(self, LogicLevel::Low)
    }
}

impl Not for LogicLevel {
    type Output = LogicLevel;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl From<bool> for LogicLevel {
    fn from(high: bool) -> Self {
        if high {
            LogicLevel::High
        } else {
            LogicLevel::Low
        }
    }
}

impl From<LogicLevel> for bool {
    fn from(level: LogicLevel) -> Self {
        level.is_high()
    }
}

/// Integer was neither `LOW` (0) nor `HIGH` (1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LevelError(pub u8);

impl TryFrom<u8> for LogicLevel {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LogicLevel::Low),
            1 => Ok(LogicLevel::High),
            other => Err(LevelError(other)),
        }
    }
}

impl From<LogicLevel> for u8 {
    fn from(level: LogicLevel) -> Self {
        match level {
            LogicLevel::Low => 0,
            LogicLevel::High => 1,
        }
    }
}

/// Digital pin identifier
///
/// An opaque index into whatever provides the digital inputs. Holding a
/// `Pin` does not own or configure the line; setting the pin mode is the
/// caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    /// Create a pin handle from its board number
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Board number of this pin
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for Pin {
    fn from(number: u8) -> Self {
        Self(number)
    }
}

/// Source of instantaneous digital input levels
///
/// Reads must be non-blocking and cheap enough to call in a tight loop;
/// pulse timing is only as good as the read latency.
pub trait DigitalLevelReader {
    /// Read the current level of `pin`
    fn read(&mut self, pin: Pin) -> LogicLevel;

    /// Check if `pin` currently reads high
    fn is_high(&mut self, pin: Pin) -> bool {
        self.read(pin).is_high()
    }

    /// Check if `pin` currently reads low
    fn is_low(&mut self, pin: Pin) -> bool {
        self.read(pin).is_low()
    }
}

impl<T: DigitalLevelReader + ?Sized> DigitalLevelReader for &mut T {
    fn read(&mut self, pin: Pin) -> LogicLevel {
        (**self).read(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock input bank: bit N of the mask is the level of pin N
    struct MockInputs {
        mask: u32,
    }

    impl DigitalLevelReader for MockInputs {
        fn read(&mut self, pin: Pin) -> LogicLevel {
            LogicLevel::from(self.mask & (1 << pin.number()) != 0)
        }
    }

    #[test]
    fn test_opposite() {
        assert_eq!(LogicLevel::High.opposite(), LogicLevel::Low);
        assert_eq!(LogicLevel::Low.opposite(), LogicLevel::High);
        assert_eq!(!LogicLevel::High, LogicLevel::Low);
    }

    #[test]
    fn test_arduino_constants() {
        assert_eq!(LogicLevel::try_from(0), Ok(LogicLevel::Low));
        assert_eq!(LogicLevel::try_from(1), Ok(LogicLevel::High));
        assert_eq!(LogicLevel::try_from(2), Err(LevelError(2)));
        assert_eq!(u8::from(LogicLevel::High), 1);
        assert_eq!(u8::from(LogicLevel::Low), 0);
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(LogicLevel::from(true), LogicLevel::High);
        assert!(!bool::from(LogicLevel::Low));
    }

    fn read_pin<R: DigitalLevelReader>(mut reader: R, number: u8) -> LogicLevel {
        reader.read(Pin::from(number))
    }

    #[test]
    fn test_reader_helpers() {
        let mut inputs = MockInputs { mask: 0b1000 };

        assert!(inputs.is_high(Pin::new(3)));
        assert!(inputs.is_low(Pin::new(2)));

        // Borrowed readers see the same lines
        assert_eq!(read_pin(&mut inputs, 3), LogicLevel::High);
        assert_eq!(read_pin(&mut inputs, 0), LogicLevel::Low);
    }
}
