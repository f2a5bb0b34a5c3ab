pub mod format;
pub mod mmap;
pub mod record;
pub mod store;
