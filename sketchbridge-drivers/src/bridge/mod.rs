//! Bridges from `embedded-hal` 1.0 peripherals to SketchBridge traits
//!
//! Lets any chip HAL that implements `embedded-hal` back the Arduino API.

pub mod i2c;
pub mod input;

pub use i2c::HalI2c;
pub use input::InputBank;
