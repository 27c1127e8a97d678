//! I2C bus from an `embedded-hal` controller

use embedded_hal::i2c::I2c;
use sketchbridge_hal::I2cBus;

/// [`I2cBus`] over any `embedded-hal` 1.0 I2C controller (7-bit addresses)
pub struct HalI2c<I> {
    i2c: I,
}

impl<I: I2c> HalI2c<I> {
    /// Wrap a configured I2C controller
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give back the controller
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for HalI2c<I> {
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(&mut self.i2c, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        I2c::read(&mut self.i2c, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        I2c::write_read(&mut self.i2c, address, write_data, read_buf)
    }
}
