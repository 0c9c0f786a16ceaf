//! # Backing Store Traits

use super::errors::StoreResult;

/// A randomly-addressable byte-range stream over one named object.
///
/// The capability probes may go false when the underlying connection is
/// transiently invalidated; the directory layer reacts by discarding the
/// stream and opening a fresh one. Dropping a stream releases its
/// connection.
pub trait BlobStream: Send {
    /// Current cursor position, in bytes from the start of the object.
    fn position(&self) -> u64;

    /// Current object length in bytes.
    fn len(&self) -> StoreResult<u64>;

    /// Whether the connection can currently serve reads.
    fn is_readable(&self) -> bool;

    /// Whether the connection can currently accept writes.
    fn is_writable(&self) -> bool;

    /// Whether the cursor can currently be repositioned.
    fn is_seekable(&self) -> bool;

    /// Repositions the cursor to an absolute offset from the start.
    fn seek(&mut self, pos: u64) -> StoreResult<()>;

    /// Reads up to `buf.len()` bytes at the cursor, advancing it.
    ///
    /// Returns the number of bytes read; 0 means the cursor is at or past
    /// the end of the object.
    fn read(&mut self, buf: &mut [u8]) -> StoreResult<usize>;

    /// Writes all of `buf` at the cursor, advancing it. Writing past the
    /// current end zero-fills the gap, page-blob style.
    fn write(&mut self, buf: &[u8]) -> StoreResult<()>;

    /// Forces written bytes down to the backing medium.
    fn flush(&mut self) -> StoreResult<()>;
}

/// A per-name object namespace with byte-range access to each object.
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Opens an existing object for reading and writing.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if no object with that name exists.
    fn open(&self, name: &str) -> StoreResult<Box<dyn BlobStream>>;

    /// Creates a new empty object, truncating any existing one, and
    /// returns a stream positioned at the start.
    fn create(&self, name: &str) -> StoreResult<Box<dyn BlobStream>>;

    /// Whether an object with that name exists.
    fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Length of the named object in bytes.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if no object with that name exists.
    fn len(&self, name: &str) -> StoreResult<u64>;

    /// Deletes the named object if present. Deleting an absent name is a
    /// no-op.
    fn delete_if_exists(&self, name: &str) -> StoreResult<()>;

    /// Every object name currently present in the namespace.
    fn list(&self) -> StoreResult<Vec<String>>;
}
