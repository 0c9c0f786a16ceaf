//! Buffered CRC-32 accumulator
//!
//! Batches incoming bytes before feeding the engine, so the hot write path
//! pays one table-driven pass per buffer instead of one call per byte.
//! Slices at least as large as the buffer bypass it entirely, avoiding a
//! redundant copy.

use super::crc32::Crc32;

/// Default internal buffer capacity in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// A [`Crc32`] front end that batches small updates.
///
/// The observable value is independent of buffering granularity: for any
/// interleaving of [`BufferedCrc32::update_byte`] and
/// [`BufferedCrc32::update`] calls, [`BufferedCrc32::value`] equals the
/// CRC-32 of the concatenated input.
#[derive(Debug)]
pub struct BufferedCrc32 {
    digest: Crc32,
    buffer: Box<[u8]>,
    upto: usize,
}

impl BufferedCrc32 {
    /// Creates an accumulator with [`DEFAULT_BUFFER_SIZE`] capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Creates an accumulator with the given buffer capacity.
    ///
    /// A zero capacity degenerates to feeding the engine directly.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            digest: Crc32::new(),
            buffer: vec![0u8; capacity].into_boxed_slice(),
            upto: 0,
        }
    }

    /// Appends one byte, flushing to the engine when the buffer is full.
    pub fn update_byte(&mut self, b: u8) {
        if self.upto == self.buffer.len() {
            self.flush();
        }
        if self.buffer.is_empty() {
            self.digest.update_byte(b);
        } else {
            self.buffer[self.upto] = b;
            self.upto += 1;
        }
    }

    /// Appends a slice of bytes.
    ///
    /// Slices of at least the buffer capacity are fed to the engine
    /// directly after flushing any pending bytes; smaller slices are
    /// copied into the buffer, flushing first if they would overflow it.
    pub fn update(&mut self, bytes: &[u8]) {
        if bytes.len() >= self.buffer.len() {
            self.flush();
            self.digest.update(bytes);
        } else {
            if self.upto + bytes.len() > self.buffer.len() {
                self.flush();
            }
            self.buffer[self.upto..self.upto + bytes.len()].copy_from_slice(bytes);
            self.upto += bytes.len();
        }
    }

    /// Returns the checksum of every byte fed so far, flushing pending
    /// bytes first.
    pub fn value(&mut self) -> u32 {
        self.flush();
        self.digest.value()
    }

    /// Clears the buffer position and resets the engine.
    pub fn reset(&mut self) {
        self.upto = 0;
        self.digest.reset();
    }

    fn flush(&mut self) {
        if self.upto > 0 {
            self.digest.update(&self.buffer[..self.upto]);
        }
        self.upto = 0;
    }
}

impl Default for BufferedCrc32 {
    fn default() -> Self {
        Self::new()
    }
}
