//! Typed access to records.
//!
//! A `Record` type supplies the `(id, size)` pair the store works with: the id
//! is an associated constant and the size is the type's in-memory size.
//! Record data sits at 8-byte offsets inside a region that itself is only
//! 4-byte aligned, so values are copied in and out rather than referenced.

use std::marker::PhantomData;

use bytemuck::Pod;

/// A plain-old-data type that can be persisted in a record store.
///
/// Ids must be non-zero and unique among the types sharing a store. Changing
/// the layout of a type without changing its id makes existing files report
/// `RecordLookup::RecordInvalid`.
pub trait Record: Pod {
    const ID: u16;
}

/// A mutable view of a record's bytes, read and written as `T`.
pub struct TypedRecord<'a, T: Record> {
    bytes: &'a mut [u8],
    _marker: PhantomData<T>,
}

impl<'a, T: Record> TypedRecord<'a, T> {
    pub(crate) fn new(bytes: &'a mut [u8]) -> Self {
        debug_assert_eq!(bytes.len(), std::mem::size_of::<T>());
        Self {
            bytes,
            _marker: PhantomData,
        }
    }

    pub fn read(&self) -> T {
        bytemuck::pod_read_unaligned(&*self.bytes)
    }

    pub fn write(&mut self, value: &T) {
        self.bytes.copy_from_slice(bytemuck::bytes_of(value));
    }

    /// Read, modify and write back in one go.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        let mut value = self.read();
        f(&mut value);
        self.write(&value);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &*self.bytes
    }
}
