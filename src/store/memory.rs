//! # In-Memory Backend
//!
//! Objects live in a shared map; streams hold a handle to the map and a
//! cursor. Writes are applied to the map immediately, so `flush` is a
//! no-op and completed writes are visible to every other handle.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::backend::{BlobStore, BlobStream};
use super::errors::{StoreError, StoreResult};

type Objects = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// In-memory object store backend
///
/// Cloning yields a second handle to the same namespace.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    objects: Objects,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&self, name: &str) -> MemoryStream {
        MemoryStream {
            objects: Arc::clone(&self.objects),
            name: name.to_string(),
            pos: 0,
        }
    }
}

impl BlobStore for MemoryStore {
    fn open(&self, name: &str) -> StoreResult<Box<dyn BlobStream>> {
        let objects = read_guard(&self.objects)?;
        if !objects.contains_key(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        drop(objects);
        Ok(Box::new(self.stream(name)))
    }

    fn create(&self, name: &str) -> StoreResult<Box<dyn BlobStream>> {
        let mut objects = write_guard(&self.objects)?;
        objects.insert(name.to_string(), Vec::new());
        drop(objects);
        Ok(Box::new(self.stream(name)))
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(read_guard(&self.objects)?.contains_key(name))
    }

    fn len(&self, name: &str) -> StoreResult<u64> {
        let objects = read_guard(&self.objects)?;
        objects
            .get(name)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn delete_if_exists(&self, name: &str) -> StoreResult<()> {
        write_guard(&self.objects)?.remove(name);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = read_guard(&self.objects)?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Cursor over one object in a [`MemoryStore`].
struct MemoryStream {
    objects: Objects,
    name: String,
    pos: u64,
}

impl BlobStream for MemoryStream {
    fn position(&self) -> u64 {
        self.pos
    }

    fn len(&self) -> StoreResult<u64> {
        let objects = read_guard(&self.objects)?;
        objects
            .get(&self.name)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StoreError::NotFound(self.name.clone()))
    }

    fn is_readable(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        true
    }

    fn is_seekable(&self) -> bool {
        true
    }

    fn seek(&mut self, pos: u64) -> StoreResult<()> {
        self.pos = pos;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> StoreResult<usize> {
        let objects = read_guard(&self.objects)?;
        let data = objects
            .get(&self.name)
            .ok_or_else(|| StoreError::NotFound(self.name.clone()))?;

        let start = self.pos.min(data.len() as u64) as usize;
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        drop(objects);

        self.pos += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> StoreResult<()> {
        let mut objects = write_guard(&self.objects)?;
        let data = objects
            .get_mut(&self.name)
            .ok_or_else(|| StoreError::NotFound(self.name.clone()))?;

        let start = self.pos as usize;
        let end = start + buf.len();
        // Seeking past the end and writing zero-fills the gap.
        if data.len() < end {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buf);
        drop(objects);

        self.pos = end as u64;
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

fn read_guard(objects: &Objects) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<u8>>>> {
    objects
        .read()
        .map_err(|_| StoreError::Internal("lock poisoned".into()))
}

fn write_guard(objects: &Objects) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>> {
    objects
        .write()
        .map_err(|_| StoreError::Internal("lock poisoned".into()))
}
