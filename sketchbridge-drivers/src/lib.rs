//! Hardware driver implementations
//!
//! This crate provides concrete implementations on top of the traits
//! defined in `sketchbridge-hal`:
//!
//! - I2C EEPROM (the Arduino `EEPROM` object)
//! - `embedded-hal` 1.0 bridges for input pins and I2C buses

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod eeprom;
