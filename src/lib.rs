//! clouddir - blob-backed virtual directory for full-text index storage
//!
//! Presents a named-file catalog whose files are physically stored as
//! remotely hosted, randomly-addressable byte-range objects, so an
//! indexing engine can treat object storage as a local directory:
//!
//! - `checksum` - CRC-32 engine and the buffered accumulator the write
//!   path routes every byte through
//! - `store` - the backing object-store traits plus in-memory and
//!   local-filesystem backends
//! - `directory` - the catalog, the input/output streams bound to single
//!   files, and the pluggable lock factory

pub mod checksum;
pub mod directory;
pub mod store;

pub use checksum::{BufferedCrc32, Crc32, DEFAULT_BUFFER_SIZE};
pub use directory::{
    BlobInput, BlobOutput, CloudDirectory, DirectoryConfig, DirectoryError, DirectoryLock,
    DirectoryResult, IndexInput, IndexOutput, LockFactory, SingleInstanceLockFactory,
};
pub use store::{BlobStore, BlobStream, LocalStore, MemoryStore, StoreError, StoreResult};

/// Current version of clouddir
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
