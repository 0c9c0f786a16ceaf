//! # Checksum Module
//!
//! Write-path integrity tracking for directory output streams.
//!
//! Every byte written through a [`crate::directory::BlobOutput`] passes
//! through a [`BufferedCrc32`], so the consuming engine can verify the file
//! on its next read. This layer only accumulates the value; it never
//! verifies or persists it.

pub mod buffered;
pub mod crc32;

pub use buffered::{BufferedCrc32, DEFAULT_BUFFER_SIZE};
pub use crc32::Crc32;
