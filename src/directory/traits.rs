//! # Stream Capability Traits
//!
//! The seams the indexing engine consumes: a readable+seekable input
//! capability and a writable+seekable+checksummed output capability. The
//! directory hands out concrete values satisfying these traits instead of
//! subclassing a framework stream type.

use super::errors::DirectoryResult;

/// Readable, seekable view of one named file.
///
/// Accessors take `&mut self` because the underlying connection is
/// lazily acquired and may be reacquired at any operation.
pub trait IndexInput {
    /// Current cursor position in bytes.
    fn position(&mut self) -> DirectoryResult<u64>;

    /// Current file length in bytes, from the live connection.
    fn len(&mut self) -> DirectoryResult<u64>;

    /// Reads and returns the byte at the cursor.
    fn read_byte(&mut self) -> DirectoryResult<u8>;

    /// Fills `buf` completely from the cursor.
    ///
    /// # Errors
    ///
    /// `DirectoryError::ReadPastEof` if the file ends before `buf` is full.
    fn read_bytes(&mut self, buf: &mut [u8]) -> DirectoryResult<()>;

    /// Repositions the cursor to an absolute offset from the start.
    fn seek(&mut self, pos: u64) -> DirectoryResult<()>;
}

/// Writable, seekable, checksummed view of one named file.
pub trait IndexOutput {
    /// Current cursor position in bytes.
    fn position(&mut self) -> DirectoryResult<u64>;

    /// Checksum of every byte written through this handle so far.
    fn checksum(&mut self) -> u32;

    /// Writes one byte at the cursor.
    fn write_byte(&mut self, b: u8) -> DirectoryResult<()>;

    /// Writes all of `buf` at the cursor.
    fn write_bytes(&mut self, buf: &[u8]) -> DirectoryResult<()>;

    /// Forces the connection to persist buffered bytes.
    fn flush(&mut self) -> DirectoryResult<()>;

    /// Repositions the cursor to an absolute offset from the start.
    fn seek(&mut self, pos: u64) -> DirectoryResult<()>;
}
