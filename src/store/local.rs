//! # Local Filesystem Backend
//!
//! One object per file under a root directory. The namespace is flat:
//! object names must not contain path separators, so a name can never
//! escape the root.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use super::backend::{BlobStore, BlobStream};
use super::errors::{StoreError, StoreResult};

/// Local filesystem object store backend
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Creates a backend rooted at `root`, creating the directory if
    /// missing.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    fn object_path(&self, name: &str) -> StoreResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl BlobStore for LocalStore {
    fn open(&self, name: &str) -> StoreResult<Box<dyn BlobStream>> {
        let path = self.object_path(name)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| StoreError::from_io(name, e))?;
        Ok(Box::new(LocalStream { file, pos: 0 }))
    }

    fn create(&self, name: &str) -> StoreResult<Box<dyn BlobStream>> {
        let path = self.object_path(name)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Box::new(LocalStream { file, pos: 0 }))
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.object_path(name)?.exists())
    }

    fn len(&self, name: &str) -> StoreResult<u64> {
        let path = self.object_path(name)?;
        let metadata = fs::metadata(&path).map_err(|e| StoreError::from_io(name, e))?;
        Ok(metadata.len())
    }

    fn delete_if_exists(&self, name: &str) -> StoreResult<()> {
        let path = self.object_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::Io(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            if entry
                .file_type()
                .map_err(|e| StoreError::Io(e.to_string()))?
                .is_file()
            {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Cursor over one file-backed object.
///
/// The tracked position mirrors the file cursor; only this handle touches
/// the underlying `File`, so they stay in sync.
struct LocalStream {
    file: File,
    pos: u64,
}

impl BlobStream for LocalStream {
    fn position(&self) -> u64 {
        self.pos
    }

    fn len(&self) -> StoreResult<u64> {
        let metadata = self.file.metadata().map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(metadata.len())
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
        self.file
            .seek(SeekFrom::Start(pos))
            .map_err(|e| StoreError::Io(e.to_string()))?;
        self.pos = pos;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> StoreResult<usize> {
        let n = self.file.read(buf).map_err(|e| StoreError::Io(e.to_string()))?;
        self.pos += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> StoreResult<()> {
        self.file
            .write_all(buf)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        // fsync, so completed writes survive the process.
        self.file
            .sync_all()
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_write_read() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path()).unwrap();

        let mut stream = store.create("seg_1").unwrap();
        stream.write(b"hello").unwrap();
        stream.flush().unwrap();

        let mut reader = store.open("seg_1").unwrap();
        let mut buf = [0u8; 5];
        assert_eq!(reader.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn test_open_missing_object() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path()).unwrap();
        assert!(matches!(store.open("absent"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.len("absent"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_rejects_path_escapes() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path()).unwrap();
        for name in ["", ".", "..", "a/b", "a\\b"] {
            assert!(
                matches!(store.create(name), Err(StoreError::InvalidName(_))),
                "name {name:?}"
            );
        }
    }

    #[test]
    fn test_delete_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path()).unwrap();
        store.create("obj").unwrap();
        store.delete_if_exists("obj").unwrap();
        store.delete_if_exists("obj").unwrap();
        assert!(!store.exists("obj").unwrap());
    }

    #[test]
    fn test_list_only_sees_files() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path()).unwrap();
        store.create("b").unwrap();
        store.create("a").unwrap();
        fs::create_dir(temp.path().join("subdir")).unwrap();
        assert_eq!(store.list().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_seek_past_end_zero_fills() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path()).unwrap();

        let mut stream = store.create("obj").unwrap();
        stream.seek(3).unwrap();
        stream.write(b"x").unwrap();

        let mut reader = store.open("obj").unwrap();
        let mut buf = [0xffu8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, &[0, 0, 0, b'x']);
    }
}
