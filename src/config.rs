//! Configuration for a record store.
//!
//! A store is fully described by where it lives, how many bytes of record data
//! it holds and how many directory slots it has. All three are fixed for the
//! lifetime of a file; changing any of them means recreating the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::storage::format::{private_size, CHUNK_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    /// Backing file. Created if it does not exist.
    pub path: PathBuf,

    /// Size of the public (record data) region in bytes.
    /// Must be a non-zero multiple of 8.
    pub data_size: u32,

    /// Number of directory slots.
    pub record_count: u16,
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("records.bin"),
            data_size: 4096,
            record_count: 64,
        }
    }
}

impl RecordStoreConfig {
    pub fn new(path: impl Into<PathBuf>, data_size: u32, record_count: u16) -> Self {
        Self {
            path: path.into(),
            data_size,
            record_count,
        }
    }

    /// Create a new config builder
    pub fn builder() -> RecordStoreConfigBuilder {
        RecordStoreConfigBuilder::default()
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Bytes taken by the header and directory.
    pub fn private_size(&self) -> u64 {
        private_size(self.record_count) as u64
    }

    /// Total size of the backing file.
    pub fn total_size(&self) -> u64 {
        self.data_size as u64 + self.private_size()
    }

    /// Checks everything that can be checked without touching the file.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::Config("path must not be empty".to_string()));
        }
        if self.data_size == 0 {
            return Err(StoreError::Config("data size must be non-zero".to_string()));
        }
        if self.data_size as usize % CHUNK_SIZE != 0 {
            return Err(StoreError::Config(format!(
                "data size must be a multiple of {}, got {}",
                CHUNK_SIZE, self.data_size
            )));
        }
        if self.record_count == 0 {
            return Err(StoreError::Config("record count must be non-zero".to_string()));
        }
        if self.total_size() > u32::MAX as u64 {
            return Err(StoreError::Config(format!(
                "file size too large: {} bytes",
                self.total_size()
            )));
        }
        Ok(())
    }
}

/// Builder for RecordStoreConfig
#[derive(Default)]
pub struct RecordStoreConfigBuilder {
    config: RecordStoreConfig,
}

impl RecordStoreConfigBuilder {
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the size of the record data region (in bytes)
    pub fn data_size(mut self, size: u32) -> Self {
        self.config.data_size = size;
        self
    }

    /// Set the number of directory slots
    pub fn record_count(mut self, count: u16) -> Self {
        self.config.record_count = count;
        self
    }

    pub fn build(self) -> RecordStoreConfig {
        self.config
    }
}
