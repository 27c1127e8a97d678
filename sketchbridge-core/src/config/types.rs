//! Configuration type definitions

use sketchbridge_hal::Ticks;

use crate::pulse::{PulseLimits, DEFAULT_TIMEOUT_US};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 7-bit I2C address of the on-board 24-series EEPROM
pub const DEFAULT_EEPROM_ADDRESS: u8 = 0x50;

/// Default EEPROM size in bytes (24LC256)
pub const DEFAULT_EEPROM_CAPACITY: u32 = 32_768;

/// Default EEPROM write page size in bytes
pub const DEFAULT_EEPROM_PAGE_SIZE: u16 = 64;

/// Largest page size the EEPROM driver can frame in one transaction
pub const MAX_EEPROM_PAGE_SIZE: u16 = 256;

/// Pulse measurement settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PulseConfig {
    /// Time to wait for a pulse to start (µs)
    pub timeout_us: Ticks,
    /// Longest pulse accepted by bounded measurements (µs)
    ///
    /// Only applies to `try_measure`; `pulseIn()` itself never gives up
    /// once a pulse has started.
    pub max_width_us: Option<Ticks>,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            timeout_us: DEFAULT_TIMEOUT_US,
            max_width_us: None,
        }
    }
}

impl From<PulseConfig> for PulseLimits {
    fn from(config: PulseConfig) -> Self {
        PulseLimits {
            timeout: config.timeout_us,
            max_width: config.max_width_us,
        }
    }
}

/// I2C EEPROM settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EepromConfig {
    /// 7-bit I2C device address
    pub address: u8,
    /// Size of the memory in bytes
    pub capacity: u32,
    /// Write page size in bytes
    pub page_size: u16,
}

impl Default for EepromConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_EEPROM_ADDRESS,
            capacity: DEFAULT_EEPROM_CAPACITY,
            page_size: DEFAULT_EEPROM_PAGE_SIZE,
        }
    }
}

impl EepromConfig {
    /// Check the settings can be used by the driver
    ///
    /// The memory must fit the 16-bit address space and the page size must
    /// be non-zero and fit a single framed write.
    pub fn is_valid(&self) -> bool {
        self.address <= 0x7F
            && self.capacity > 0
            && self.capacity <= 0x1_0000
            && self.page_size > 0
            && self.page_size <= MAX_EEPROM_PAGE_SIZE
    }
}

/// Complete configuration of the Arduino API layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeConfig {
    /// `pulseIn()` settings
    pub pulse: PulseConfig,
    /// `EEPROM` settings
    pub eeprom: EepromConfig,
}
