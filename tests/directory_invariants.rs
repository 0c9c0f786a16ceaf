//! Directory Invariant Tests
//!
//! Tests for catalog invariants:
//! - Listings track creation and deletion exactly
//! - Deletes are idempotent
//! - Lengths are reported live from the backing store
//! - A closed directory refuses every catalog operation
//! - Lock discipline is exposed but not enforced by the directory

use std::sync::Arc;

use clouddir::{
    CloudDirectory, DirectoryError, DirectoryLock, IndexInput, IndexOutput, LocalStore,
    MemoryStore, DEFAULT_BUFFER_SIZE,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn memory_directory() -> CloudDirectory {
    CloudDirectory::new(Arc::new(MemoryStore::new()), "index")
}

fn write_file(dir: &CloudDirectory, name: &str, data: &[u8]) {
    let mut out = dir.create_output(name).unwrap();
    out.write_bytes(data).unwrap();
    out.flush().unwrap();
}

// =============================================================================
// Catalog Consistency Tests
// =============================================================================

/// A created file shows up in the listing; a deleted one disappears
/// until recreated.
#[test]
fn test_listing_tracks_create_and_delete() {
    let dir = memory_directory();
    write_file(&dir, "f", b"payload");
    assert_eq!(dir.list_all().unwrap(), vec!["f"]);

    dir.delete_file("f").unwrap();
    assert!(dir.list_all().unwrap().is_empty());
    #[allow(deprecated)]
    {
        assert!(!dir.file_exists("f").unwrap());
    }

    write_file(&dir, "f", b"again");
    assert_eq!(dir.list_all().unwrap(), vec!["f"]);
}

/// Creating an output always overwrites: the old content is gone even
/// before any bytes are written.
#[test]
fn test_create_output_overwrites() {
    let dir = memory_directory();
    write_file(&dir, "f", b"original content");

    let _out = dir.create_output("f").unwrap();
    assert_eq!(dir.file_length("f").unwrap(), 0);
}

/// Deleting twice, or deleting a name that never existed, is a no-op.
#[test]
fn test_delete_is_idempotent() {
    let dir = memory_directory();
    write_file(&dir, "f", b"payload");

    dir.delete_file("f").unwrap();
    dir.delete_file("f").unwrap();
    dir.delete_file("never existed").unwrap();
}

/// Opening an input for a missing name only fails at first access.
#[test]
fn test_open_input_missing_name_fails_on_first_access() {
    let dir = memory_directory();
    let mut input = dir.open_input("absent").unwrap();
    assert!(matches!(
        input.read_byte(),
        Err(DirectoryError::FileNotFound(name)) if name == "absent"
    ));
}

// =============================================================================
// Length Accuracy Tests
// =============================================================================

/// file_length reports the exact byte count written.
#[test]
fn test_file_length_accuracy() {
    let dir = memory_directory();
    for len in [0usize, 1, DEFAULT_BUFFER_SIZE + 37] {
        let data = vec![0x5au8; len];
        write_file(&dir, "f", &data);
        assert_eq!(dir.file_length("f").unwrap(), len as u64, "len {len}");
    }
}

/// Length of a missing file is a failure, not zero.
#[test]
fn test_file_length_missing_name() {
    let dir = memory_directory();
    assert!(matches!(
        dir.file_length("absent"),
        Err(DirectoryError::FileNotFound(_))
    ));
}

/// Aggregate size is the live sum of all file lengths.
#[test]
fn test_size_in_bytes_tracks_store() {
    let dir = memory_directory();
    assert_eq!(dir.size_in_bytes().unwrap(), 0);

    write_file(&dir, "a", b"1234");
    write_file(&dir, "b", b"56789");
    assert_eq!(dir.size_in_bytes().unwrap(), 9);

    dir.delete_file("a").unwrap();
    assert_eq!(dir.size_in_bytes().unwrap(), 5);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

/// Every catalog operation fails deterministically after close.
#[test]
fn test_closed_directory_fails_all_operations() {
    let dir = memory_directory();
    write_file(&dir, "f", b"payload");
    dir.close();

    assert!(matches!(dir.list_all(), Err(DirectoryError::DirectoryClosed)));
    assert!(matches!(
        dir.file_length("f"),
        Err(DirectoryError::DirectoryClosed)
    ));
    assert!(matches!(
        dir.delete_file("f"),
        Err(DirectoryError::DirectoryClosed)
    ));
    assert!(matches!(
        dir.create_output("g").map(|_| ()),
        Err(DirectoryError::DirectoryClosed)
    ));
    assert!(matches!(
        dir.open_input("f").map(|_| ()),
        Err(DirectoryError::DirectoryClosed)
    ));
    assert!(matches!(dir.sync(&[]), Err(DirectoryError::DirectoryClosed)));
    assert!(matches!(
        dir.size_in_bytes(),
        Err(DirectoryError::DirectoryClosed)
    ));
}

/// Closing is sticky and repeatable.
#[test]
fn test_close_is_idempotent() {
    let dir = memory_directory();
    dir.close();
    dir.close();
    assert!(!dir.is_open());
}

/// The backing data outlives a closed directory: a new directory over
/// the same store sees the files.
#[test]
fn test_data_survives_directory_lifetime() {
    let store = Arc::new(MemoryStore::new());
    let first = CloudDirectory::new(Arc::clone(&store) as Arc<dyn clouddir::BlobStore>, "index");
    write_file(&first, "f", b"persistent");
    first.close();

    let second = CloudDirectory::new(store, "index");
    assert_eq!(second.file_length("f").unwrap(), 10);
}

// =============================================================================
// Lock Discipline Tests
// =============================================================================

/// Lock ids are process-unique per directory instance.
#[test]
fn test_lock_ids_are_instance_unique() {
    let a = memory_directory();
    let b = memory_directory();
    assert_ne!(a.lock_id(), b.lock_id());
}

/// Two writers contending on the same lock name: only one obtains it.
#[test]
fn test_single_writer_discipline_via_factory() {
    let dir = memory_directory();
    let lock_name = format!("{}-write.lock", dir.lock_id());

    let mut first = dir.make_lock(&lock_name);
    let mut second = dir.make_lock(&lock_name);

    assert!(first.obtain().unwrap());
    assert!(!second.obtain().unwrap());

    first.release();
    assert!(second.obtain().unwrap());
}

/// The directory itself never blocks concurrent writers; discipline is
/// entirely the factory's.
#[test]
fn test_directory_does_not_enforce_locking() {
    let dir = memory_directory();
    let out1 = dir.create_output("f").unwrap();
    let out2 = dir.create_output("f").unwrap();
    drop(out1);
    drop(out2);
}

// =============================================================================
// Filesystem Backend Tests
// =============================================================================

/// The catalog behaves identically over the filesystem backend.
#[test]
fn test_catalog_on_local_backend() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = LocalStore::new(temp.path()).unwrap();
    let dir = CloudDirectory::new(Arc::new(store), "index");

    write_file(&dir, "seg_1", b"hello world");
    assert_eq!(dir.list_all().unwrap(), vec!["seg_1"]);
    assert_eq!(dir.file_length("seg_1").unwrap(), 11);

    let mut input = dir.open_input("seg_1").unwrap();
    let mut buf = [0u8; 11];
    input.read_bytes(&mut buf).unwrap();
    assert_eq!(&buf, b"hello world");

    dir.delete_file("seg_1").unwrap();
    assert!(dir.list_all().unwrap().is_empty());
}
