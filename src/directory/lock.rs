//! # Lock Factory
//!
//! Pluggable single-writer coordination. The directory constructs and
//! exposes a factory but never enforces locking itself; the consuming
//! engine obtains a write lock through the factory before mutating the
//! index. The default factory serializes writers within one process only.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::errors::{DirectoryError, DirectoryResult};

/// A named lock handed out by a [`LockFactory`].
pub trait DirectoryLock: Send {
    /// Attempts to acquire the lock; returns whether it was obtained.
    /// Obtaining a lock this handle already holds is a no-op returning
    /// `true`.
    fn obtain(&mut self) -> DirectoryResult<bool>;

    /// Releases the lock if this handle holds it.
    fn release(&mut self);

    /// Whether this handle currently holds the lock.
    fn is_locked(&self) -> bool;
}

/// Produces [`DirectoryLock`]s scoped to one directory instance.
pub trait LockFactory: Send + Sync + std::fmt::Debug {
    /// Returns a lock handle for `name`; the lock is not yet obtained.
    fn make_lock(&self, name: &str) -> Box<dyn DirectoryLock>;

    /// Forcibly clears the named lock, e.g. after a crashed writer.
    fn clear_lock(&self, name: &str) -> DirectoryResult<()>;
}

type HeldLocks = Arc<Mutex<HashSet<String>>>;

/// Default factory: locks are held in a process-local set, so writers in
/// the same process are serialized and writers in other processes are not
/// seen at all.
#[derive(Debug, Default)]
pub struct SingleInstanceLockFactory {
    held: HeldLocks,
}

impl SingleInstanceLockFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockFactory for SingleInstanceLockFactory {
    fn make_lock(&self, name: &str) -> Box<dyn DirectoryLock> {
        Box::new(SingleInstanceLock {
            held: Arc::clone(&self.held),
            name: name.to_string(),
            locked: false,
        })
    }

    fn clear_lock(&self, name: &str) -> DirectoryResult<()> {
        self.held
            .lock()
            .map_err(|_| DirectoryError::Internal("lock registry poisoned".into()))?
            .remove(name);
        Ok(())
    }
}

struct SingleInstanceLock {
    held: HeldLocks,
    name: String,
    locked: bool,
}

impl DirectoryLock for SingleInstanceLock {
    fn obtain(&mut self) -> DirectoryResult<bool> {
        if self.locked {
            return Ok(true);
        }
        let mut held = self
            .held
            .lock()
            .map_err(|_| DirectoryError::Internal("lock registry poisoned".into()))?;
        self.locked = held.insert(self.name.clone());
        Ok(self.locked)
    }

    fn release(&mut self) {
        if self.locked {
            if let Ok(mut held) = self.held.lock() {
                held.remove(&self.name);
            }
            self.locked = false;
        }
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Drop for SingleInstanceLock {
    fn drop(&mut self) {
        self.release();
    }
}
