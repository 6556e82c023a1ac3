//! Persisted brightness.
//!
//! The level is stored as a little-endian `u16` in a two byte region. Only
//! settled levels are written, and only when they differ from what is
//! already stored.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::SettledListener;
use crate::level::MAX_LEVEL;

/// Size of the persisted record in bytes
pub const LEVEL_RECORD_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    DriverError,
    InvalidData,
}

/// Non-volatile byte storage holding the level record
pub trait StorageDriver {
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError>;
    fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError>;
}

/// Encode a level into its persisted form
pub const fn encode_level(level: u8) -> [u8; LEVEL_RECORD_SIZE] {
    (level as u16).to_le_bytes()
}

/// Decode a persisted level, rejecting values out of range
///
/// Erased storage (`0xFF 0xFF`) decodes as invalid.
pub fn decode_level(data: [u8; LEVEL_RECORD_SIZE]) -> Result<u8, StorageError> {
    let raw = u16::from_le_bytes(data);
    u8::try_from(raw)
        .ok()
        .filter(|level| *level <= MAX_LEVEL)
        .ok_or(StorageError::InvalidData)
}

/// Level persistence on top of a storage driver
pub struct LevelStore<D: StorageDriver> {
    driver: D,
    stored: Option<u8>,
}

impl<D: StorageDriver> LevelStore<D> {
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            stored: None,
        }
    }

    /// Read the persisted level
    pub fn load(&mut self) -> Result<u8, StorageError> {
        let mut buffer = [0u8; LEVEL_RECORD_SIZE];
        self.driver.read(&mut buffer)?;
        let level = decode_level(buffer)?;
        self.stored = Some(level);
        Ok(level)
    }

    /// Read the persisted level, falling back to 0 (off) when it is unusable
    pub fn load_or_default(&mut self) -> u8 {
        match self.load() {
            Ok(level) => level,
            Err(_error) => {
                #[cfg(feature = "esp32-log")]
                println!("[LevelStore.load] using default level: {:?}", _error);
                0
            }
        }
    }

    /// Persist a level, skipping the write if it is already stored
    pub fn save(&mut self, level: u8) -> Result<(), StorageError> {
        let level = level.min(MAX_LEVEL);
        if self.stored == Some(level) {
            return Ok(());
        }
        self.driver.write(&encode_level(level))?;
        self.stored = Some(level);
        Ok(())
    }

    /// Level known to be in storage, if any
    pub const fn stored(&self) -> Option<u8> {
        self.stored
    }

    /// Get a reference to the storage driver.
    pub const fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: StorageDriver> SettledListener for LevelStore<D> {
    fn on_settled(&mut self, level: u8, is_on: bool) {
        let level = if is_on { level } else { 0 };
        if let Err(_error) = self.save(level) {
            #[cfg(feature = "esp32-log")]
            println!("[LevelStore.save] failed to persist {}: {:?}", level, _error);
        }
    }
}
