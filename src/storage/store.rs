use std::fs::File;
use std::io::{ErrorKind, Read};
use std::ops::Range;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::config::RecordStoreConfig;
use crate::core::bitmap::RangeBitmap;
use crate::core::checksum::fletcher32;
use crate::error::{Result, StoreError};
use crate::storage::format::{
    chunks_for, entry_range, private_size, DirectoryEntry, FileHeader, CHUNK_SIZE, FILE_MAGIC,
    FORMAT_VERSION, HEADER_SIZE,
};
use crate::storage::mmap::MappedFile;
use crate::storage::record::{Record, TypedRecord};

/// Outcome of a record lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLookup {
    /// No record with this id existed; a zeroed one was allocated.
    Created,
    /// An existing record with the same id and size was found.
    Opened,
    /// A record with this id exists but with a different size, or the
    /// request cannot be served at all (invalid store, unusable record type).
    RecordInvalid,
    /// Every directory slot holds a live, non-matching record.
    RecordTableExhausted,
    /// No contiguous run of free chunks is large enough.
    DataRegionExhausted,
}

impl RecordLookup {
    /// True when the lookup handed out record data.
    pub fn has_valid_data(self) -> bool {
        matches!(self, Self::Created | Self::Opened)
    }
}

/// A memory-mapped, fixed-capacity table of binary records.
///
/// Opening never fails outright: a store that could not be opened or did not
/// validate is simply invalid (`is_valid() == false`) and `open_error()` says
/// why. An invalid store that is still mapped can be wiped with `reset()`.
///
/// The stored checksum covers the public region and is only written on an
/// orderly close, so a file that was not closed cleanly fails validation on
/// the next open.
pub struct RecordStore {
    config: RecordStoreConfig,
    mapping: Option<MappedFile>,
    valid: bool,
    open_error: Option<StoreError>,

    // one bit per chunk of the public region
    allocator: RangeBitmap,

    // directory slots in use, tombstones included
    used: u16,
}

impl RecordStore {
    pub fn open(config: RecordStoreConfig) -> Self {
        let mut store = Self {
            config,
            mapping: None,
            valid: false,
            open_error: None,
            allocator: RangeBitmap::default(),
            used: 0,
        };

        match store.create() {
            Ok(()) => {
                store.valid = true;
                info!(
                    path = %store.config.path.display(),
                    size = store.config.total_size(),
                    records = store.config.record_count,
                    used = store.used,
                    "record store opened"
                );
            }
            Err(err) => {
                error!(path = %store.config.path.display(), %err, "record store unusable");
                store.open_error = Some(err);
            }
        }

        store
    }

    fn create(&mut self) -> Result<()> {
        self.config.validate()?;

        let total = self.config.total_size();
        let path = self.config.path.clone();

        // refuse before resizing so a rejected file keeps its length
        if let Some(existing) = ExistingFile::read(&path)? {
            existing.check(total)?;
        }

        self.mapping = Some(MappedFile::open(&path, total)?);

        let header = self.header();
        match header.magic {
            0 => {
                debug!(path = %path.display(), "initializing new record store");
                self.write_empty_layout();
            }
            FILE_MAGIC => self.validate(&header)?,
            found => {
                if let Some(mapping) = self.mapping.take() {
                    mapping.close();
                }
                return Err(StoreError::ForeignMagic { found });
            }
        }

        self.used = self.header().used;

        let chunks = self.public_size() / CHUNK_SIZE;
        self.allocator.resize(chunks);
        self.seed_allocator();

        // stays zero until an orderly close
        self.header_mut().checksum = 0;

        Ok(())
    }

    fn validate(&self, header: &FileHeader) -> Result<()> {
        if header.version != FORMAT_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: FORMAT_VERSION,
                found: header.version,
            });
        }

        let expected_size = self.config.total_size() as u32;
        if header.size != expected_size {
            return Err(StoreError::SizeMismatch {
                expected: expected_size,
                found: header.size,
            });
        }

        let computed = self.calc_checksum();
        if header.checksum != computed {
            return Err(StoreError::ChecksumMismatch {
                stored: header.checksum,
                computed,
            });
        }

        if header.count != self.config.record_count {
            return Err(StoreError::CountMismatch {
                expected: self.config.record_count,
                found: header.count,
            });
        }

        if header.used > header.count {
            return Err(StoreError::UsedOverLimit {
                used: header.used,
                count: header.count,
            });
        }

        Ok(())
    }

    /// Header with no records and every directory slot free.
    fn write_empty_layout(&mut self) {
        let header = FileHeader::empty(self.config.record_count, self.config.total_size() as u32);
        *self.header_mut() = header;

        let directory = HEADER_SIZE..self.private_size();
        self.mapped_mut()[directory].fill(0);
    }

    /// Marks the private reservation and every live record as allocated.
    fn seed_allocator(&mut self) {
        let chunks = self.allocator.len();
        let reserved = (self.private_size() / CHUNK_SIZE).min(chunks);
        self.allocator.set_range(0, reserved);

        for slot in 0..self.scanned_slots() {
            let entry = self.entry(slot);
            if entry.is_free() {
                continue;
            }

            let lo = entry.offset() as usize / CHUNK_SIZE;
            let hi = chunks_for(entry.end());
            if hi > chunks {
                warn!(
                    slot,
                    id = entry.id(),
                    offset = entry.offset(),
                    size = entry.size(),
                    "record lies outside the data region, skipping"
                );
                continue;
            }

            self.allocator.set_range(lo, hi);
        }
    }

    /// Find the record `id`, or create a zeroed one of `size` bytes.
    ///
    /// A store that failed validation serves nothing and reports
    /// `RecordInvalid` until it is `reset()`.
    ///
    /// Panics if nothing is mapped, or if `id` or `size` is zero.
    pub fn get_record(&mut self, id: u16, size: u16) -> (RecordLookup, Option<&mut [u8]>) {
        assert!(self.is_data_mapped(), "record store is not mapped");
        assert!(id != 0, "record id 0 marks a free slot");
        assert!(size != 0, "records must have a non-zero size");

        if !self.valid {
            warn!(id, size, "record store failed validation, not serving records");
            return (RecordLookup::RecordInvalid, None);
        }

        debug!(id, size, "looking for record");

        // one past `used` so the first never-used slot is a candidate
        let scan = (self.used as usize + 1).min(self.config.record_count as usize);

        let mut candidate = None;
        let mut found = None;
        for slot in 0..scan {
            let entry = self.entry(slot);
            if entry.is_free() {
                candidate = candidate.or(Some(slot));
                continue;
            }

            if entry.id() == id {
                found = Some(entry);
                break;
            }
        }

        if let Some(entry) = found {
            if entry.size() != size {
                error!(
                    id,
                    stored = entry.size(),
                    requested = size,
                    "record size mismatch, somebody didnt update the record id"
                );
                return (RecordLookup::RecordInvalid, None);
            }

            let Some(range) = self.record_range(&entry) else {
                error!(id, offset = entry.offset(), size, "record lies outside the data region");
                return (RecordLookup::RecordInvalid, None);
            };

            info!(id, size, offset = entry.offset(), "record found");
            return (RecordLookup::Opened, Some(&mut self.mapped_mut()[range]));
        }

        let Some(slot) = candidate else {
            error!(
                used = self.used,
                capacity = self.config.record_count,
                "record slots at capacity, cant create new record"
            );
            return (RecordLookup::RecordTableExhausted, None);
        };

        let index = self.allocator.allocate_range(chunks_for(size as usize));
        if index == RangeBitmap::INVALID {
            error!(
                id,
                size,
                free_chunks = self.allocator.freecount(),
                "unable to find free space for record"
            );
            return (RecordLookup::DataRegionExhausted, None);
        }

        let offset = (index * CHUNK_SIZE) as u32;
        let entry = DirectoryEntry::new(id, offset, size);
        self.set_entry(slot, entry);

        if slot == self.used as usize {
            self.used += 1;
        }
        let used = self.used;
        self.header_mut().used = used;

        info!(id, size, offset, slot, "record created");

        // allocated chunks always lie inside the data region
        let start = self.private_size() + offset as usize;
        let data = &mut self.mapped_mut()[start..start + size as usize];
        data.fill(0);
        (RecordLookup::Created, Some(data))
    }

    /// Typed get-or-create using `T::ID` and the size of `T`.
    ///
    /// Types with id 0, zero-sized types and types larger than a directory
    /// entry can describe are reported as `RecordInvalid`.
    pub fn typed<T: Record>(&mut self) -> (RecordLookup, Option<TypedRecord<'_, T>>) {
        let size = match u16::try_from(std::mem::size_of::<T>()) {
            Ok(0) | Err(_) => {
                error!(
                    id = T::ID,
                    size = std::mem::size_of::<T>(),
                    "record type size does not fit a directory entry"
                );
                return (RecordLookup::RecordInvalid, None);
            }
            Ok(size) => size,
        };
        if T::ID == 0 {
            error!(size, "record id 0 marks a free slot");
            return (RecordLookup::RecordInvalid, None);
        }

        let (lookup, data) = self.get_record(T::ID, size);
        (lookup, data.map(TypedRecord::new))
    }

    /// Read-only view of an existing record.
    pub fn find_record(&self, id: u16) -> Option<&[u8]> {
        assert!(self.is_data_mapped(), "record store is not mapped");

        let entry = self.entries().find(|(_, entry)| entry.id() == id)?.1;
        let range = self.record_range(&entry)?;
        Some(&self.mapped()[range])
    }

    /// Turn the record `id` into a tombstone and release its space.
    /// Returns false if there is no such record or the store is invalid.
    pub fn remove_record(&mut self, id: u16) -> bool {
        assert!(self.is_data_mapped(), "record store is not mapped");
        assert!(id != 0, "record id 0 marks a free slot");

        if !self.valid {
            warn!(id, "record store failed validation, not removing records");
            return false;
        }

        let Some((slot, entry)) = self.entries().find(|(_, entry)| entry.id() == id) else {
            return false;
        };

        self.set_entry(slot, DirectoryEntry::default());

        let lo = entry.offset() as usize / CHUNK_SIZE;
        let hi = chunks_for(entry.end());
        if hi <= self.allocator.len() {
            self.allocator.clear_range(lo, hi);
        }

        // the private reservation stays allocated
        let reserved = (self.private_size() / CHUNK_SIZE).min(self.allocator.len());
        self.allocator.set_range(0, reserved);

        info!(id, slot, "record removed");
        true
    }

    /// Live directory entries with their slot index.
    pub fn entries(&self) -> impl Iterator<Item = (usize, DirectoryEntry)> + '_ {
        (0..self.scanned_slots())
            .map(move |slot| (slot, self.entry(slot)))
            .filter(|(_, entry)| !entry.is_free())
    }

    /// Erase all records, keeping the capacity. Does not unmap the file.
    pub fn reset(&mut self) {
        assert!(self.is_data_mapped(), "record store is not mapped");

        self.write_empty_layout();
        self.used = 0;

        self.allocator.resize_and_clear(self.public_size() / CHUNK_SIZE);
        self.seed_allocator();

        self.valid = true;
        self.open_error = None;

        info!(path = %self.config.path.display(), "record store reset");
    }

    pub fn flush(&self) -> Result<()> {
        self.mapped().flush()
    }

    /// Write the checksum and release the mapping. Safe to call more than once.
    pub fn close(&mut self) {
        let Some(mut mapping) = self.mapping.take() else {
            return;
        };

        info!(path = %self.config.path.display(), "closing record store");

        if self.valid {
            let private = private_size(self.config.record_count);
            let header = FileHeader {
                used: self.used,
                checksum: fletcher32(&mapping[private..]),
                ..FileHeader::empty(self.config.record_count, self.config.total_size() as u32)
            };
            mapping[..HEADER_SIZE].copy_from_slice(bytemuck::bytes_of(&header));
        }

        mapping.close();

        self.valid = false;
        self.allocator.clear();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn is_valid(&self) -> bool {
        self.valid && self.is_data_mapped()
    }

    pub fn is_data_mapped(&self) -> bool {
        self.mapping.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &RecordStoreConfig {
        &self.config
    }

    /// Configured number of directory slots.
    pub fn record_count(&self) -> u16 {
        self.config.record_count
    }

    pub fn used_count(&self) -> u16 {
        self.used
    }

    /// Why the store is invalid, if opening failed.
    pub fn open_error(&self) -> Option<&StoreError> {
        self.open_error.as_ref()
    }

    pub fn header(&self) -> FileHeader {
        *bytemuck::from_bytes::<FileHeader>(&self.mapped()[..HEADER_SIZE])
    }

    /// Checksum currently stored in the header.
    pub fn read_checksum(&self) -> u32 {
        self.header().checksum
    }

    /// Checksum of the public region as it is right now.
    pub fn calc_checksum(&self) -> u32 {
        fletcher32(&self.mapped()[self.private_size()..])
    }

    pub fn public_size(&self) -> usize {
        self.mapped().len() - self.private_size()
    }

    pub fn free_chunks(&self) -> usize {
        self.allocator.freecount()
    }

    // -------------------------------------------------------------------------
    // Mapping helpers
    // -------------------------------------------------------------------------

    fn mapped(&self) -> &MappedFile {
        self.mapping.as_ref().expect("record store is not mapped")
    }

    fn mapped_mut(&mut self) -> &mut MappedFile {
        self.mapping.as_mut().expect("record store is not mapped")
    }

    fn header_mut(&mut self) -> &mut FileHeader {
        bytemuck::from_bytes_mut(&mut self.mapped_mut()[..HEADER_SIZE])
    }

    fn private_size(&self) -> usize {
        private_size(self.config.record_count)
    }

    fn scanned_slots(&self) -> usize {
        (self.used as usize).min(self.config.record_count as usize)
    }

    fn entry(&self, slot: usize) -> DirectoryEntry {
        *bytemuck::from_bytes::<DirectoryEntry>(&self.mapped()[entry_range(slot)])
    }

    fn set_entry(&mut self, slot: usize, entry: DirectoryEntry) {
        self.mapped_mut()[entry_range(slot)].copy_from_slice(bytemuck::bytes_of(&entry));
    }

    /// File range of a record's data, if it lies inside the public region.
    fn record_range(&self, entry: &DirectoryEntry) -> Option<Range<usize>> {
        if entry.end() > self.public_size() {
            return None;
        }
        let start = self.private_size() + entry.offset() as usize;
        Some(start..start + entry.size() as usize)
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        self.close();
    }
}

/// Length and leading bytes of a file that exists before the store maps it.
struct ExistingFile {
    len: u64,
    // zero-padded past `len`
    head: [u8; HEADER_SIZE],
}

impl ExistingFile {
    fn read(path: &Path) -> Result<Option<Self>> {
        let open_err = |source: std::io::Error| StoreError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(open_err(source)),
        };
        let len = file.metadata().map_err(open_err)?.len();

        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        file.take(HEADER_SIZE as u64).read_to_end(&mut bytes)?;

        let mut head = [0u8; HEADER_SIZE];
        head[..bytes.len()].copy_from_slice(&bytes);

        Ok(Some(Self { len, head }))
    }

    fn header(&self) -> FileHeader {
        bytemuck::pod_read_unaligned(&self.head)
    }

    /// Rejects anything the store would have to resize or overwrite to use.
    /// Empty and all-zero files are treated as new.
    fn check(&self, total: u64) -> Result<()> {
        let header = self.header();
        let short = self.len < HEADER_SIZE as u64;

        match header.magic {
            0 if short && self.head.iter().any(|&b| b != 0) => {
                Err(StoreError::ForeignMagic { found: 0 })
            }
            0 => Ok(()),
            FILE_MAGIC if short => Err(StoreError::LengthMismatch {
                expected: total,
                found: self.len,
            }),
            FILE_MAGIC => {
                if header.version != FORMAT_VERSION {
                    return Err(StoreError::VersionMismatch {
                        expected: FORMAT_VERSION,
                        found: header.version,
                    });
                }
                if header.size as u64 != total {
                    return Err(StoreError::SizeMismatch {
                        expected: total as u32,
                        found: header.size,
                    });
                }
                if self.len != total {
                    return Err(StoreError::LengthMismatch {
                        expected: total,
                        found: self.len,
                    });
                }
                Ok(())
            }
            found => Err(StoreError::ForeignMagic { found }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config(dir: &TempDir, data_size: u32, record_count: u16) -> RecordStoreConfig {
        RecordStoreConfig::new(dir.path().join("records.bin"), data_size, record_count)
    }

    #[test]
    fn test_new_file_gets_fresh_header() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let store = RecordStore::open(temp_config(&dir, 256, 4));

        assert!(store.is_valid());
        let header = store.header();
        assert_eq!(header.magic, FILE_MAGIC);
        assert_eq!(header.version, FORMAT_VERSION);
        assert_eq!(header.count, 4);
        assert_eq!(header.used, 0);
        assert_eq!(header.size, 256 + 52);
        assert_eq!(header.checksum, 0);
        assert_eq!(std::fs::metadata(store.path())?.len(), 256 + 52);
        Ok(())
    }

    #[test]
    fn test_private_reservation_is_allocated() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let store = RecordStore::open(temp_config(&dir, 256, 4));

        // 52 bytes of header and directory reserve 6 chunks
        assert_eq!(store.free_chunks(), 32 - 6);
        Ok(())
    }

    #[test]
    fn test_records_are_placed_first_fit() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut store = RecordStore::open(temp_config(&dir, 256, 4));

        let (lookup, _) = store.get_record(1, 12);
        assert_eq!(lookup, RecordLookup::Created);
        let (lookup, _) = store.get_record(2, 8);
        assert_eq!(lookup, RecordLookup::Created);

        let entries: Vec<_> = store.entries().map(|(_, e)| (e.id(), e.offset(), e.size())).collect();
        assert_eq!(entries, vec![(1, 48, 12), (2, 64, 8)]);
        assert_eq!(store.used_count(), 2);
        assert_eq!(store.header().used, 2);
        Ok(())
    }

    #[test]
    fn test_created_record_is_zeroed() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut store = RecordStore::open(temp_config(&dir, 64, 1));

        let (_, data) = store.get_record(5, 16);
        let data = data.ok_or("no data")?;
        data.fill(0xEE);
        assert!(store.remove_record(5));

        // reuses the same chunks, which must come back zeroed
        let (lookup, data) = store.get_record(6, 16);
        assert_eq!(lookup, RecordLookup::Created);
        assert!(data.ok_or("no data")?.iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn test_tombstone_reuse_keeps_used_within_count() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut store = RecordStore::open(temp_config(&dir, 256, 2));

        assert_eq!(store.get_record(1, 8).0, RecordLookup::Created);
        assert_eq!(store.get_record(2, 8).0, RecordLookup::Created);
        assert!(store.remove_record(1));
        assert!(!store.remove_record(1));

        assert_eq!(store.get_record(3, 8).0, RecordLookup::Created);
        assert_eq!(store.used_count(), 2);
        assert_eq!(store.get_record(4, 8).0, RecordLookup::RecordTableExhausted);

        let ids: Vec<_> = store.entries().map(|(slot, e)| (slot, e.id())).collect();
        assert_eq!(ids, vec![(0, 3), (1, 2)]);
        Ok(())
    }

    #[test]
    fn test_find_record_is_read_only_lookup() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut store = RecordStore::open(temp_config(&dir, 64, 2));

        assert!(store.find_record(9).is_none());
        store.get_record(9, 4).1.ok_or("no data")?.copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(store.find_record(9), Some(&[1u8, 2, 3, 4][..]));
        Ok(())
    }

    #[test]
    fn test_close_writes_checksum() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let config = temp_config(&dir, 64, 2);
        let mut store = RecordStore::open(config.clone());
        store.get_record(3, 8).1.ok_or("no data")?.copy_from_slice(b"checksum");
        let expected = store.calc_checksum();
        store.close();
        store.close();

        assert!(!store.is_data_mapped());
        let bytes = std::fs::read(&config.path)?;
        let header: FileHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
        assert_eq!(header.checksum, expected);
        assert_eq!(header.used, 1);
        Ok(())
    }

    #[test]
    fn test_invalid_config_leaves_no_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let store = RecordStore::open(temp_config(&dir, 12, 2));

        assert!(!store.is_valid());
        assert!(!store.is_data_mapped());
        assert!(matches!(store.open_error(), Some(StoreError::Config(_))));
        assert!(!dir.path().join("records.bin").exists());
        Ok(())
    }

    #[test]
    #[should_panic(expected = "not mapped")]
    fn test_get_record_on_unmapped_store_panics() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::open(temp_config(&dir, 12, 2));
        store.get_record(1, 8);
    }

    #[derive(Clone, Copy)]
    struct Marker;

    unsafe impl bytemuck::Zeroable for Marker {}
    unsafe impl bytemuck::Pod for Marker {}

    impl Record for Marker {
        const ID: u16 = 3;
    }

    #[repr(C)]
    #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    struct Unnumbered {
        value: u32,
    }

    impl Record for Unnumbered {
        const ID: u16 = 0;
    }

    #[test]
    fn test_typed_rejects_unstorable_types() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut store = RecordStore::open(temp_config(&dir, 64, 2));

        let (lookup, record) = store.typed::<Marker>();
        assert_eq!(lookup, RecordLookup::RecordInvalid);
        assert!(record.is_none());

        let (lookup, record) = store.typed::<Unnumbered>();
        assert_eq!(lookup, RecordLookup::RecordInvalid);
        assert!(record.is_none());

        assert_eq!(store.used_count(), 0);
        assert_eq!(store.entries().count(), 0);
        Ok(())
    }

    fn existing(len: u64, header: FileHeader) -> ExistingFile {
        let mut head = [0u8; HEADER_SIZE];
        head.copy_from_slice(bytemuck::bytes_of(&header));
        ExistingFile { len, head }
    }

    #[test]
    fn test_existing_file_checks_version_before_size() {
        let mut header = FileHeader::empty(4, 100);
        header.version = FORMAT_VERSION + 1;

        let err = existing(100, header).check(308).unwrap_err();
        assert!(matches!(err, StoreError::VersionMismatch { .. }));

        header.version = FORMAT_VERSION;
        let err = existing(100, header).check(308).unwrap_err();
        assert!(matches!(err, StoreError::SizeMismatch { expected: 308, found: 100 }));

        let err = existing(76, FileHeader::empty(4, 308)).check(308).unwrap_err();
        assert!(matches!(err, StoreError::LengthMismatch { expected: 308, found: 76 }));

        assert!(existing(308, FileHeader::empty(4, 308)).check(308).is_ok());
    }

    #[test]
    fn test_existing_short_file_is_new_only_when_blank() {
        let blank = ExistingFile {
            len: 6,
            head: [0u8; HEADER_SIZE],
        };
        assert!(blank.check(308).is_ok());

        let mut head = [0u8; HEADER_SIZE];
        head[..6].copy_from_slice(b"hello\n");
        let text = ExistingFile { len: 6, head };
        assert!(matches!(text.check(308), Err(StoreError::ForeignMagic { .. })));
    }
}
