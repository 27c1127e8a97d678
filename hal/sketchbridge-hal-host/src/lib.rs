//! Hosted platform support for SketchBridge
//!
//! Runs the Arduino API layer on an operating system rather than bare
//! metal:
//!
//! - [`clock::HostClock`] - `micros()`, `millis()` and delays from the OS
//!   monotonic timer
//! - [`config`] - TOML configuration files

pub mod clock;
pub mod config;

pub use clock::{delay, delay_microseconds, micros, millis, HostClock};
pub use config::{load_config, parse_config, ConfigError};
