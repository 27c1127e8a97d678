//! Configuration file loading
//!
//! Reads [`BridgeConfig`] from TOML. Every key is optional; anything left
//! out keeps its default.
//!
//! ```toml
//! [pulse]
//! timeout_us = 30000
//! max_width_us = 25000
//!
//! [eeprom]
//! address = 0x50
//! capacity = 32768
//! page_size = 64
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use sketchbridge_core::config::BridgeConfig;

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(io::Error),
    /// The file is not valid TOML for [`BridgeConfig`]
    Parse(toml::de::Error),
    /// The values parsed but cannot be used
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid(what) => write!(f, "invalid config: {what}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Parse configuration from TOML text
pub fn parse_config(input: &str) -> Result<BridgeConfig, ConfigError> {
    let config: BridgeConfig = toml::from_str(input)?;

    if !config.eeprom.is_valid() {
        return Err(ConfigError::Invalid(
            "eeprom: address must be 7-bit, capacity 1..=65536, page_size 1..=256",
        ));
    }

    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<BridgeConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}
