//! # Blob Output Stream
//!
//! Write side of the directory: adapts one named object into a writable,
//! seekable stream with a running checksum. The connection is created
//! eagerly (create/overwrite semantics), every byte written passes through
//! a [`BufferedCrc32`] before the store write, and the checksum covers
//! exactly the bytes written through this handle regardless of buffering
//! granularity.
//!
//! Dropping an output releases the connection without flushing it. A
//! caller that wants the bytes persisted must call
//! [`IndexOutput::flush`] first; skipping it risks losing whatever the
//! backend still holds in transit.

use std::sync::Arc;

use tracing::debug;

use super::errors::{map_store_error, DirectoryError, DirectoryResult};
use super::traits::IndexOutput;
use crate::checksum::BufferedCrc32;
use crate::store::{BlobStore, BlobStream};

/// Write stream over one named file in a directory.
pub struct BlobOutput {
    store: Arc<dyn BlobStore>,
    name: String,
    stream: Option<Box<dyn BlobStream>>,
    crc: BufferedCrc32,
}

impl BlobOutput {
    /// Creates (or overwrites) the named object and binds a stream to it.
    pub(crate) fn create(
        store: Arc<dyn BlobStore>,
        name: String,
        checksum_buffer_size: usize,
    ) -> DirectoryResult<Self> {
        let stream = store.create(&name)?;
        Ok(Self {
            store,
            name,
            stream: Some(stream),
            crc: BufferedCrc32::with_capacity(checksum_buffer_size),
        })
    }

    /// Name of the file this stream is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a live writable+seekable connection, reopening an
    /// invalidated one. Position is preserved across a reopen.
    fn ensure_stream(&mut self) -> DirectoryResult<&mut (dyn BlobStream + 'static)> {
        let mut resume_at = None;
        if let Some(current) = self.stream.as_deref() {
            if !(current.is_writable() && current.is_seekable()) {
                debug!(name = %self.name, "output connection invalidated, reopening");
                resume_at = Some(current.position());
                self.stream = None;
            }
        }

        if self.stream.is_none() {
            // The object exists since creation, so reopen rather than
            // recreate; recreating would truncate bytes already written.
            let mut stream = self
                .store
                .open(&self.name)
                .map_err(|e| map_store_error(&self.name, e))?;
            if !(stream.is_writable() && stream.is_seekable()) {
                return Err(DirectoryError::StreamUnusable(self.name.clone()));
            }
            if let Some(pos) = resume_at {
                stream.seek(pos)?;
            }
            self.stream = Some(stream);
        }

        self.stream
            .as_deref_mut()
            .ok_or_else(|| DirectoryError::StreamUnusable(self.name.clone()))
    }
}

impl IndexOutput for BlobOutput {
    fn position(&mut self) -> DirectoryResult<u64> {
        Ok(self.ensure_stream()?.position())
    }

    fn checksum(&mut self) -> u32 {
        self.crc.value()
    }

    fn write_byte(&mut self, b: u8) -> DirectoryResult<()> {
        // Checksum first, then write: the accumulator covers every byte
        // handed to this stream, in write order.
        self.ensure_stream()?;
        self.crc.update_byte(b);
        self.ensure_stream()?.write(&[b])?;
        Ok(())
    }

    fn write_bytes(&mut self, buf: &[u8]) -> DirectoryResult<()> {
        self.ensure_stream()?;
        self.crc.update(buf);
        self.ensure_stream()?.write(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> DirectoryResult<()> {
        self.ensure_stream()?.flush()?;
        Ok(())
    }

    fn seek(&mut self, pos: u64) -> DirectoryResult<()> {
        self.ensure_stream()?.seek(pos)?;
        Ok(())
    }
}

impl std::fmt::Debug for BlobOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobOutput")
            .field("name", &self.name)
            .field("connected", &self.stream.is_some())
            .finish()
    }
}
