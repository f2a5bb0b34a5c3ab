//! # record_store
//!
//! A fixed-capacity table of independently-sized binary records living in one
//! pre-sized, memory-mapped file.
//!
//! ```text
//! offset 0
//! ┌──────────────────────────────┐  ─┐
//! │ FileHeader (20 bytes)        │   │ private region
//! ├──────────────────────────────┤   │ 20 + count * 8
//! │ DirectoryEntry x count (8 B) │   │
//! ├──────────────────────────────┤  ─┤
//! │ record data, 8-byte chunks   │   │ public region
//! │ (Fletcher-32 checksummed)    │   │ data_size
//! └──────────────────────────────┘  ─┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod storage;

pub use config::RecordStoreConfig;
pub use error::{Result, StoreError};
pub use storage::record::{Record, TypedRecord};
pub use storage::store::{RecordLookup, RecordStore};
