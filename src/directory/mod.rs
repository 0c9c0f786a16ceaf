//! # Virtual Directory Module
//!
//! The named-file abstraction consumed by the indexing engine. A
//! [`CloudDirectory`] catalogs files physically stored as byte-range
//! objects in a [`crate::store::BlobStore`], and hands out
//! [`BlobInput`]/[`BlobOutput`] streams bound to one file each. Writer
//! coordination is delegated to a pluggable [`LockFactory`].

pub mod catalog;
pub mod errors;
pub mod input;
pub mod lock;
pub mod output;
pub mod traits;

pub use catalog::{CloudDirectory, DirectoryConfig};
pub use errors::{DirectoryError, DirectoryResult};
pub use input::BlobInput;
pub use lock::{DirectoryLock, LockFactory, SingleInstanceLockFactory};
pub use output::BlobOutput;
pub use traits::{IndexInput, IndexOutput};
