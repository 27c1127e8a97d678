//! Board-agnostic core logic for SketchBridge
//!
//! This crate contains the parts of the Arduino API that are pure logic on
//! top of the capabilities in `sketchbridge-hal`:
//!
//! - Pulse width measurement (`pulseIn`) with wraparound-safe timing
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod pulse;

pub use pulse::{
    duration, pulse_in, PulseLimits, PulseMeasurer, PulseOutcome, DEFAULT_TIMEOUT_US,
};
