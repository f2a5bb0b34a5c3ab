pub mod bitmap;
pub mod checksum;
pub mod diagnostics;
