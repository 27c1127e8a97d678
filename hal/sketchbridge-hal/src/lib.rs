//! SketchBridge Hardware Abstraction Layer
//!
//! This crate defines the capabilities an Arduino-style sketch expects from
//! the board it runs on. Platform crates (or the `embedded-hal` bridges in
//! `sketchbridge-drivers`) implement them; `sketchbridge-core` consumes them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Sketch code (pulse_in, EEPROM, ...)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sketchbridge-hal (this crate - traits) │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ sketchbridge- │       │  embedded-hal │
//! │   hal-host    │       │    bridges    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalLevelReader`] - Instantaneous digital input levels
//! - [`clock::MicrosecondClock`] - Free-running 32-bit microsecond counter
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use clock::{MicrosecondClock, Ticks, MAX_TICKS};
pub use gpio::{DigitalLevelReader, LevelError, LogicLevel, Pin};
pub use i2c::I2cBus;
