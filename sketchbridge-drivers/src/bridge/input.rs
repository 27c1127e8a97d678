//! Digital inputs from `embedded-hal` pins

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use sketchbridge_hal::{DigitalLevelReader, LogicLevel, Pin};

/// Fixed set of input pins addressed by Arduino pin number
///
/// Slot `n` of the array answers for `Pin::new(n)`. Pins outside the bank
/// read [`LogicLevel::Low`], like an unconnected line with a pull-down.
///
/// Only infallible pins are accepted: GPIO reads on the supported chip
/// HALs cannot fail, and `pulseIn()` has no way to report an error.
pub struct InputBank<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> InputBank<P, N> {
    /// Create a bank from pins already configured as inputs
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Number of pins in the bank
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the bank has no pins
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Give back the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P, const N: usize> DigitalLevelReader for InputBank<P, N>
where
    P: InputPin<Error = Infallible>,
{
    fn read(&mut self, pin: Pin) -> LogicLevel {
        match self.pins.get_mut(pin.number() as usize) {
            Some(input) => match input.is_high() {
                Ok(high) => LogicLevel::from(high),
                Err(never) => match never {},
            },
            None => LogicLevel::Low,
        }
    }
}
