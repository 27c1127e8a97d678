//! Configuration types
//!
//! Board-agnostic settings for the Arduino API layer. With the `serde`
//! feature they can be loaded from a config file by the platform crate.

pub mod types;

pub use types::*;
