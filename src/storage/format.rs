use bytemuck::{Pod, Zeroable};

/// `'\0MUC'` read as a big-endian multi-char constant.
pub const FILE_MAGIC: u32 = u32::from_be_bytes(*b"\0MUC");
pub const FORMAT_VERSION: u32 = 1;

/// Allocation granularity of the public region.
pub const CHUNK_SIZE: usize = 8;

pub const HEADER_SIZE: usize = std::mem::size_of::<FileHeader>();
pub const ENTRY_SIZE: usize = std::mem::size_of::<DirectoryEntry>();

/// The 20-byte file header.
///
/// Header fields are in host byte order, so a file is only portable between
/// hosts of the same endianness (in practice little-endian). Directory
/// entries are always little-endian; see `DirectoryEntry`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct FileHeader {
    pub magic: u32,
    pub version: u32,
    pub count: u16,
    pub used: u16,
    pub size: u32,
    pub checksum: u32,
}

impl FileHeader {
    /// Header of a store with no records.
    pub fn empty(count: u16, size: u32) -> Self {
        Self {
            magic: FILE_MAGIC,
            version: FORMAT_VERSION,
            count,
            used: 0,
            size,
            checksum: 0, // written at close
        }
    }
}

/// One directory slot. Fields are stored little-endian and unaligned so the
/// entry packs to exactly 8 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DirectoryEntry {
    id: [u8; 2],
    offset: [u8; 4],
    size: [u8; 2],
}

impl DirectoryEntry {
    pub fn new(id: u16, offset: u32, size: u16) -> Self {
        Self {
            id: id.to_le_bytes(),
            offset: offset.to_le_bytes(),
            size: size.to_le_bytes(),
        }
    }

    /// Record id, `0` for a free or tombstone slot.
    pub fn id(&self) -> u16 {
        u16::from_le_bytes(self.id)
    }

    /// Byte offset of the data, relative to the public region.
    pub fn offset(&self) -> u32 {
        u32::from_le_bytes(self.offset)
    }

    pub fn size(&self) -> u16 {
        u16::from_le_bytes(self.size)
    }

    pub fn is_free(&self) -> bool {
        self.id() == 0
    }

    /// End of the data, relative to the public region.
    pub fn end(&self) -> usize {
        self.offset() as usize + self.size() as usize
    }
}

// Ensure FileHeader is 20 bytes
const _: () = assert!(std::mem::size_of::<FileHeader>() == 20);
// Ensure DirectoryEntry is 8 bytes
const _: () = assert!(std::mem::size_of::<DirectoryEntry>() == 8);

/// Size of the header plus `count` directory entries.
pub const fn private_size(count: u16) -> usize {
    HEADER_SIZE + count as usize * ENTRY_SIZE
}

/// Byte range of directory slot `index` inside the file.
pub fn entry_range(index: usize) -> std::ops::Range<usize> {
    let start = HEADER_SIZE + index * ENTRY_SIZE;
    start..start + ENTRY_SIZE
}

/// Number of whole chunks needed to hold `bytes`.
pub const fn chunks_for(bytes: usize) -> usize {
    (bytes + CHUNK_SIZE - 1) / CHUNK_SIZE
}
