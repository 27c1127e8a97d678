//! 24-series I2C EEPROM
//!
//! Backs the Arduino `EEPROM` object with an external 24LCxx-style memory
//! (two address bytes, high byte first). A random read is a memory address
//! write followed by a repeated-start read; a write sends the memory
//! address and data in one transaction.
//!
//! After every write the device goes deaf for its internal write cycle
//! (a few milliseconds). The driver waits it out by acknowledge polling
//! with one-byte reads before returning. Zero-length writes would be the
//! classic poll, but many I2C controllers refuse to issue them.

use heapless::Vec;
use sketchbridge_core::config::{EepromConfig, MAX_EEPROM_PAGE_SIZE};
use sketchbridge_hal::I2cBus;

/// Acknowledge polls before a write cycle is considered stuck
///
/// At 100 kHz each poll takes about 100 µs, covering the 5 ms worst-case
/// write cycle of common parts with margin.
pub const WRITE_CYCLE_POLLS: u16 = 200;

/// Memory address bytes plus the largest page
const FRAME_CAPACITY: usize = MAX_EEPROM_PAGE_SIZE as usize + 2;

/// EEPROM errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError<E> {
    /// The I2C transaction failed (typically a NACK)
    Bus(E),
    /// The access would run past the end of the memory
    AddressOutOfRange {
        /// First byte of the access
        address: u32,
        /// Size of the memory
        capacity: u32,
    },
    /// The configuration cannot be used (see [`EepromConfig::is_valid`])
    InvalidConfig,
}

/// 24-series I2C EEPROM driver
pub struct Eeprom<B> {
    bus: B,
    config: EepromConfig,
}

impl<B: I2cBus> Eeprom<B> {
    /// Create a new EEPROM driver
    pub fn new(bus: B, config: EepromConfig) -> Self {
        Self { bus, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &EepromConfig {
        &self.config
    }

    /// Size of the memory in bytes (Arduino `EEPROM.length()`)
    pub fn length(&self) -> u32 {
        self.config.capacity
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Read one byte
    pub fn read(&mut self, address: u16) -> Result<u8, EepromError<B::Error>> {
        let mut byte = [0u8; 1];
        self.read_into(address, &mut byte)?;
        Ok(byte[0])
    }

    /// Read one byte, Arduino style
    ///
    /// Any failure (device not answering, address out of range) reads as 0.
    pub fn read_or_zero(&mut self, address: u16) -> u8 {
        match self.read(address) {
            Ok(value) => value,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("EEPROM read at {=u16} failed, returning 0", address);
                0
            }
        }
    }

    /// Sequential read starting at `address`
    pub fn read_into(
        &mut self,
        address: u16,
        buf: &mut [u8],
    ) -> Result<(), EepromError<B::Error>> {
        self.check_access(address, buf.len())?;
        if buf.is_empty() {
            return Ok(());
        }

        self.bus
            .write_read(self.config.address, &address.to_be_bytes(), buf)
            .map_err(EepromError::Bus)
    }

    /// Write one byte
    pub fn write(&mut self, address: u16, value: u8) -> Result<(), EepromError<B::Error>> {
        self.write_slice(address, &[value])
    }

    /// Write a run of bytes starting at `address`
    ///
    /// Split into one transaction per page, since the device wraps around
    /// within a page instead of crossing into the next one.
    pub fn write_slice(
        &mut self,
        address: u16,
        data: &[u8],
    ) -> Result<(), EepromError<B::Error>> {
        self.check_access(address, data.len())?;

        let page_size = self.config.page_size as usize;
        for (start, chunk) in PageChunks::new(data, address as usize, page_size) {
            let mut frame: Vec<u8, FRAME_CAPACITY> = Vec::new();
            // check_access keeps start below 2^16 and chunks within one page
            frame
                .extend_from_slice(&(start as u16).to_be_bytes())
                .map_err(|_| EepromError::InvalidConfig)?;
            frame
                .extend_from_slice(chunk)
                .map_err(|_| EepromError::InvalidConfig)?;

            self.bus
                .write(self.config.address, &frame)
                .map_err(EepromError::Bus)?;
            self.wait_write_cycle()?;
        }

        Ok(())
    }

    /// Poll the device until it acknowledges again after a write
    fn wait_write_cycle(&mut self) -> Result<(), EepromError<B::Error>> {
        let mut scratch = [0u8; 1];
        let mut attempts = 0;
        loop {
            match self.bus.read(self.config.address, &mut scratch) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    attempts += 1;
                    if attempts >= WRITE_CYCLE_POLLS {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("EEPROM still busy after {} polls", attempts);
                        return Err(EepromError::Bus(e));
                    }
                }
            }
        }
    }

    fn check_access(&self, address: u16, len: usize) -> Result<(), EepromError<B::Error>> {
        if !self.config.is_valid() {
            return Err(EepromError::InvalidConfig);
        }

        let end = address as usize + len;
        if address as u32 >= self.config.capacity || end > self.config.capacity as usize {
            return Err(EepromError::AddressOutOfRange {
                address: address as u32,
                capacity: self.config.capacity,
            });
        }

        Ok(())
    }
}

/// Splits a write into runs that do not cross page boundaries
struct PageChunks<'a> {
    data: &'a [u8],
    cursor: usize,
    page_size: usize,
}

impl<'a> PageChunks<'a> {
    fn new(data: &'a [u8], cursor: usize, page_size: usize) -> Self {
        Self {
            data,
            cursor,
            page_size,
        }
    }
}

impl<'a> Iterator for PageChunks<'a> {
    /// Memory address of the run and its bytes
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }

        let room = self.page_size - self.cursor % self.page_size;
        let (chunk, rest) = self.data.split_at(room.min(self.data.len()));
        let start = self.cursor;
        self.data = rest;
        self.cursor += chunk.len();
        Some((start, chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    /// Mock EEPROM on a mock bus
    ///
    /// Stores writes in a small memory and records each transaction.
    struct MockBus {
        memory: [u8; 512],
        pointer: usize,
        present: bool,
        /// Acknowledge polls to NACK after each data write
        busy_polls: u16,
        busy_left: u16,
        data_writes: usize,
        polls: usize,
        last_frame_len: usize,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                memory: [0xFF; 512],
                pointer: 0,
                present: true,
                busy_polls: 0,
                busy_left: 0,
                data_writes: 0,
                polls: 0,
                last_frame_len: 0,
            }
        }
    }

    impl I2cBus for MockBus {
        type Error = Nack;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
            if address != 0x50 || !self.present {
                return Err(Nack);
            }

            if data.len() < 2 {
                return Err(Nack);
            }

            let start = u16::from_be_bytes([data[0], data[1]]) as usize;
            let page_base = start & !63;
            for (i, byte) in data[2..].iter().enumerate() {
                // Real parts wrap within the page; the driver must never rely on it
                let offset = (start - page_base + i) % 64;
                self.memory[page_base + offset] = *byte;
            }
            self.data_writes += 1;
            self.last_frame_len = data.len();
            self.busy_left = self.busy_polls;
            Ok(())
        }

        /// Current-address read, only issued as an acknowledge poll
        fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Nack> {
            if address != 0x50 || !self.present {
                return Err(Nack);
            }
            self.polls += 1;
            if self.busy_left > 0 {
                self.busy_left -= 1;
                return Err(Nack);
            }
            buf.fill(self.memory[self.pointer % self.memory.len()]);
            Ok(())
        }

        fn write_read(
            &mut self,
            address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<(), Nack> {
            if address != 0x50 || !self.present {
                return Err(Nack);
            }
            self.pointer = u16::from_be_bytes([write_data[0], write_data[1]]) as usize;
            for byte in read_buf.iter_mut() {
                *byte = self.memory[self.pointer];
                self.pointer += 1;
            }
            Ok(())
        }
    }

    fn small_config() -> EepromConfig {
        EepromConfig {
            capacity: 512,
            ..EepromConfig::default()
        }
    }

    #[test]
    fn test_byte_round_trip() {
        let mut eeprom = Eeprom::new(MockBus::new(), small_config());

        eeprom.write(197, b'Z').unwrap();
        eeprom.write(198, b'@').unwrap();

        assert_eq!(eeprom.read(197), Ok(b'Z'));
        assert_eq!(eeprom.read(198), Ok(b'@'));
        // Address high byte first, then low byte, then the value
        assert_eq!(eeprom.release().last_frame_len, 3);
    }

    #[test]
    fn test_missing_device_reads_zero() {
        let mut bus = MockBus::new();
        bus.present = false;
        let mut eeprom = Eeprom::new(bus, small_config());

        assert_eq!(eeprom.read(10), Err(EepromError::Bus(Nack)));
        assert_eq!(eeprom.read_or_zero(10), 0);
    }

    #[test]
    fn test_out_of_range_rejected_before_bus() {
        let mut eeprom = Eeprom::new(MockBus::new(), small_config());

        assert_eq!(
            eeprom.write(512, 1),
            Err(EepromError::AddressOutOfRange {
                address: 512,
                capacity: 512
            })
        );
        assert!(matches!(
            eeprom.write_slice(510, &[1, 2, 3]),
            Err(EepromError::AddressOutOfRange { .. })
        ));
        assert_eq!(eeprom.read_or_zero(600), 0);
        assert_eq!(eeprom.release().data_writes, 0);
    }

    #[test]
    fn test_write_slice_splits_pages() {
        let mut eeprom = Eeprom::new(MockBus::new(), small_config());
        let data: [u8; 100] = core::array::from_fn(|i| i as u8);

        // 60..64, 64..128, 128..160
        eeprom.write_slice(60, &data).unwrap();

        let mut readback = [0u8; 100];
        eeprom.read_into(60, &mut readback).unwrap();
        assert_eq!(readback, data);

        let bus = eeprom.release();
        assert_eq!(bus.data_writes, 3);
        assert_eq!(bus.last_frame_len, 2 + 32);
    }

    #[test]
    fn test_write_waits_for_write_cycle() {
        let mut bus = MockBus::new();
        bus.busy_polls = 5;
        let mut eeprom = Eeprom::new(bus, small_config());

        eeprom.write_slice(0, &[0xAA; 70]).unwrap();

        let bus = eeprom.release();
        assert_eq!(bus.data_writes, 2);
        // Five NACKs then an ACK, per page
        assert_eq!(bus.polls, 12);
    }

    #[test]
    fn test_stuck_write_cycle_reports_bus_error() {
        let mut bus = MockBus::new();
        bus.busy_polls = WRITE_CYCLE_POLLS + 1;
        let mut eeprom = Eeprom::new(bus, small_config());

        assert_eq!(eeprom.write(0, 1), Err(EepromError::Bus(Nack)));
    }

    #[test]
    fn test_invalid_config() {
        let config = EepromConfig {
            page_size: 0,
            ..small_config()
        };
        let mut eeprom = Eeprom::new(MockBus::new(), config);

        assert_eq!(eeprom.write(0, 1), Err(EepromError::InvalidConfig));
        assert_eq!(eeprom.read(0), Err(EepromError::InvalidConfig));
    }

    #[test]
    fn test_empty_access_touches_nothing() {
        let mut eeprom = Eeprom::new(MockBus::new(), small_config());

        eeprom.write_slice(5, &[]).unwrap();
        eeprom.read_into(5, &mut []).unwrap();

        let bus = eeprom.release();
        assert_eq!(bus.data_writes, 0);
        assert_eq!(bus.polls, 0);
    }

    #[test]
    fn test_length() {
        let eeprom = Eeprom::new(MockBus::new(), EepromConfig::default());
        assert_eq!(eeprom.length(), 32_768);
        assert_eq!(eeprom.config().address, 0x50);
    }
}
