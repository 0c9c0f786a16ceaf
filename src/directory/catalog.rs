//! # Virtual Directory
//!
//! The catalog consumed by the indexing engine: lists, creates, opens and
//! deletes named files backed by an object store. File length and
//! existence are resolved live against the store on every call; no file
//! state is cached between operations. One directory is created per index
//! lifetime and closed when the engine disposes it, after which every
//! catalog operation fails its open-precondition check.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::errors::{map_store_error, DirectoryError, DirectoryResult};
use super::input::BlobInput;
use super::lock::{DirectoryLock, LockFactory, SingleInstanceLockFactory};
use super::output::BlobOutput;
use crate::checksum::DEFAULT_BUFFER_SIZE;
use crate::store::BlobStore;

/// Directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Name of the backing container this directory maps to
    pub container: String,

    /// Capacity of the per-output checksum batching buffer
    #[serde(default = "default_checksum_buffer_size")]
    pub checksum_buffer_size: usize,
}

fn default_checksum_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl DirectoryConfig {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            checksum_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// A named-file catalog backed by an object store.
pub struct CloudDirectory {
    store: Arc<dyn BlobStore>,
    config: DirectoryConfig,
    is_open: AtomicBool,
    lock_factory: Box<dyn LockFactory>,
    instance_id: Uuid,
}

impl CloudDirectory {
    /// Opens a directory over `store` with the default single-instance
    /// lock factory.
    pub fn new(store: Arc<dyn BlobStore>, container: impl Into<String>) -> Self {
        Self::with_config(store, DirectoryConfig::new(container))
    }

    pub fn with_config(store: Arc<dyn BlobStore>, config: DirectoryConfig) -> Self {
        Self::with_lock_factory(store, config, Box::new(SingleInstanceLockFactory::new()))
    }

    /// Opens a directory with an externally supplied lock factory.
    pub fn with_lock_factory(
        store: Arc<dyn BlobStore>,
        config: DirectoryConfig,
        lock_factory: Box<dyn LockFactory>,
    ) -> Self {
        Self {
            store,
            config,
            is_open: AtomicBool::new(true),
            lock_factory,
            instance_id: Uuid::new_v4(),
        }
    }

    /// Name of the backing container.
    pub fn container(&self) -> &str {
        &self.config.container
    }

    /// Whether the directory is still open.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> DirectoryResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DirectoryError::DirectoryClosed)
        }
    }

    /// Every file name currently present in the directory.
    pub fn list_all(&self) -> DirectoryResult<Vec<String>> {
        self.ensure_open()?;
        Ok(self.store.list()?)
    }

    /// Whether the named file exists.
    #[deprecated(note = "resolve names through open_input or file_length; \
                         retained for callers of the older catalog contract")]
    pub fn file_exists(&self, name: &str) -> DirectoryResult<bool> {
        self.ensure_open()?;
        Ok(self.store.exists(name)?)
    }

    /// Length in bytes of the named file.
    ///
    /// # Errors
    ///
    /// `DirectoryError::FileNotFound` if no such file exists.
    pub fn file_length(&self, name: &str) -> DirectoryResult<u64> {
        self.ensure_open()?;
        self.store.len(name).map_err(|e| map_store_error(name, e))
    }

    /// Removes the named file. Deleting an absent name is a no-op.
    pub fn delete_file(&self, name: &str) -> DirectoryResult<()> {
        self.ensure_open()?;
        self.store.delete_if_exists(name)?;
        debug!(container = %self.config.container, name, "deleted file");
        Ok(())
    }

    /// Creates a new empty file, overwriting any existing one, and
    /// returns a write stream bound to it.
    pub fn create_output(&self, name: &str) -> DirectoryResult<BlobOutput> {
        self.ensure_open()?;
        BlobOutput::create(
            Arc::clone(&self.store),
            name.to_string(),
            self.config.checksum_buffer_size,
        )
    }

    /// Returns a read stream bound to the named file. The connection is
    /// acquired lazily; a missing name fails at the first stream
    /// operation.
    pub fn open_input(&self, name: &str) -> DirectoryResult<BlobInput> {
        self.ensure_open()?;
        Ok(BlobInput::new(Arc::clone(&self.store), name.to_string()))
    }

    /// Flush-to-stable-storage hook. Deliberately a no-op: the backing
    /// store's write path already makes completed writes durable, so
    /// there is nothing further to persist at this layer.
    pub fn sync(&self, _names: &[String]) -> DirectoryResult<()> {
        self.ensure_open()?;
        Ok(())
    }

    /// Process-unique identifier for this directory instance, used to
    /// scope lock names.
    pub fn lock_id(&self) -> String {
        format!("clouddir-{}", self.instance_id.simple())
    }

    /// The lock factory coordinating single-writer access.
    pub fn lock_factory(&self) -> &dyn LockFactory {
        self.lock_factory.as_ref()
    }

    /// Replaces the lock factory.
    pub fn set_lock_factory(&mut self, lock_factory: Box<dyn LockFactory>) {
        self.lock_factory = lock_factory;
    }

    /// Convenience for `lock_factory().make_lock(name)`.
    pub fn make_lock(&self, name: &str) -> Box<dyn DirectoryLock> {
        self.lock_factory.make_lock(name)
    }

    /// Total size in bytes of all files currently in the directory,
    /// computed live from the store.
    pub fn size_in_bytes(&self) -> DirectoryResult<u64> {
        self.ensure_open()?;
        let mut total = 0u64;
        for name in self.store.list()? {
            total += self.store.len(&name)?;
        }
        Ok(total)
    }

    /// Closes the directory. Streams already handed out keep working;
    /// every subsequent catalog operation fails.
    pub fn close(&self) {
        self.is_open.store(false, Ordering::Release);
        debug!(container = %self.config.container, "directory closed");
    }
}

impl std::fmt::Debug for CloudDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudDirectory")
            .field("container", &self.config.container)
            .field("is_open", &self.is_open())
            .finish()
    }
}
