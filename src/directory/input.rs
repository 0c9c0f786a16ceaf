//! # Blob Input Stream
//!
//! Read side of the directory: adapts one named object into a readable,
//! seekable stream. The connection is acquired lazily, so a missing name
//! surfaces as [`DirectoryError::FileNotFound`] at the first operation
//! rather than at `open_input` time. Whenever the current connection stops
//! being readable+seekable it is discarded and a fresh one opened; if the
//! fresh connection still lacks the capability the operation fails with
//! [`DirectoryError::StreamUnusable`] instead of fabricating zero bytes.

use std::sync::Arc;

use tracing::debug;

use super::errors::{map_store_error, DirectoryError, DirectoryResult};
use super::traits::IndexInput;
use crate::store::{BlobStore, BlobStream};

/// Read stream over one named file in a directory.
pub struct BlobInput {
    store: Arc<dyn BlobStore>,
    name: String,
    stream: Option<Box<dyn BlobStream>>,
}

impl BlobInput {
    pub(crate) fn new(store: Arc<dyn BlobStore>, name: String) -> Self {
        Self {
            store,
            name,
            stream: None,
        }
    }

    /// Name of the file this stream is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a live readable+seekable connection, reopening an
    /// invalidated one. Position is preserved across a reopen.
    fn ensure_stream(&mut self) -> DirectoryResult<&mut (dyn BlobStream + 'static)> {
        let mut resume_at = None;
        if let Some(current) = self.stream.as_deref() {
            if !(current.is_readable() && current.is_seekable()) {
                debug!(name = %self.name, "input connection invalidated, reopening");
                resume_at = Some(current.position());
                self.stream = None;
            }
        }

        if self.stream.is_none() {
            let mut stream = self
                .store
                .open(&self.name)
                .map_err(|e| map_store_error(&self.name, e))?;
            if !(stream.is_readable() && stream.is_seekable()) {
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

impl IndexInput for BlobInput {
    fn position(&mut self) -> DirectoryResult<u64> {
        Ok(self.ensure_stream()?.position())
    }

    fn len(&mut self) -> DirectoryResult<u64> {
        let name = self.name.clone();
        self.ensure_stream()?
            .len()
            .map_err(|e| map_store_error(&name, e))
    }

    fn read_byte(&mut self) -> DirectoryResult<u8> {
        let mut buf = [0u8; 1];
        self.read_bytes(&mut buf)?;
        Ok(buf[0])
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> DirectoryResult<()> {
        let name = self.name.clone();
        let stream = self.ensure_stream()?;
        let mut filled = 0;
        while filled < buf.len() {
            let n = stream.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(DirectoryError::ReadPastEof(name));
            }
            filled += n;
        }
        Ok(())
    }

    fn seek(&mut self, pos: u64) -> DirectoryResult<()> {
        self.ensure_stream()?.seek(pos)?;
        Ok(())
    }
}

impl std::fmt::Debug for BlobInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobInput")
            .field("name", &self.name)
            .field("connected", &self.stream.is_some())
            .finish()
    }
}
