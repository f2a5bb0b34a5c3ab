use crate::error::{Result, StoreError};
use memmap2::{MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// A file opened read+write, sized up front and mapped whole.
pub struct MappedFile {
    path: PathBuf,
    file: File,
    mmap: MmapMut,
}

impl MappedFile {
    /// Open (or create) `path`, resize it to exactly `size` bytes and map it.
    /// Bytes past the previous end of the file read as zero.
    pub fn open(path: &Path, size: u64) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        file.set_len(size).map_err(|source| StoreError::Resize {
            path: path.to_path_buf(),
            size,
            source,
        })?;

        let len = usize::try_from(size).map_err(|_| StoreError::Map {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "size exceeds address space"),
        })?;

        // SAFETY: the store is the only user of this file for the lifetime of
        // the mapping; concurrent external modification is unsupported.
        let mmap = unsafe { MmapOptions::new().len(len).map_mut(&file) }.map_err(|source| {
            StoreError::Map {
                path: path.to_path_buf(),
                source,
            }
        })?;

        debug!(path = %path.display(), size, "mapped file");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> Result<()> {
        self.mmap.flush().map_err(StoreError::Flush)
    }

    /// Flush, unmap and close. Every step runs even if an earlier one fails;
    /// failures are logged.
    pub fn close(self) {
        let Self { path, file, mmap } = self;

        if let Err(err) = mmap.flush() {
            error!(path = %path.display(), %err, "unable to flush mapping");
        }
        drop(mmap);

        if let Err(err) = file.sync_all() {
            error!(path = %path.display(), %err, "unable to sync file");
        }
        drop(file);

        debug!(path = %path.display(), "closed mapped file");
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.mmap
    }
}

impl DerefMut for MappedFile {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.mmap
    }
}
