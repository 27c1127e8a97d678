//! I2C EEPROM drivers

pub mod at24;

pub use at24::{Eeprom, EepromError};
