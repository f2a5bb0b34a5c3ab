//! Error types for the record store.
//!
//! Nothing here is surfaced as a panic: `RecordStore::open` turns every one of
//! these into an invalid store and keeps the reason around for inspection.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Configuration / file backend
    // -------------------------------------------------------------------------
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unable to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to expand {path:?} to {size} bytes: {source}")]
    Resize {
        path: PathBuf,
        size: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to map {path:?}: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to flush mapping: {0}")]
    Flush(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Header validation
    // -------------------------------------------------------------------------
    #[error("Unrecognized file magic {found:#010x}, refusing to touch the file")]
    ForeignMagic { found: u32 },

    #[error("File version mismatch, {found}/{expected}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("File size mismatch, {found}/{expected}")]
    SizeMismatch { expected: u32, found: u32 },

    #[error("File length on disk mismatch, {found}/{expected}")]
    LengthMismatch { expected: u64, found: u64 },

    #[error("File checksum mismatch, {stored:#010x}/{computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("File record count mismatch, {found}/{expected}")]
    CountMismatch { expected: u16, found: u16 },

    #[error("File used count over limit, {used}/{count}")]
    UsedOverLimit { used: u16, count: u16 },
}
