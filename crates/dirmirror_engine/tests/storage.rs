use std::fs;

use dirmirror_engine::{EntryKind, LocalStorage, StorageAdapter, StorageEntry, StorageError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn write_creates_intermediate_directories() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    let handle = storage.get_or_create_directory("site").unwrap();

    let written = storage
        .write_file(&handle, "img/icons/logo.png", b"png")
        .unwrap();

    assert_eq!(written, temp.path().join("site/img/icons/logo.png"));
    assert_eq!(fs::read(&written).unwrap(), b"png");
}

#[test]
fn write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    let handle = storage.get_or_create_directory("site").unwrap();

    let first = storage.write_file(&handle, "a.txt", b"hello").unwrap();
    let second = storage.write_file(&handle, "a.txt", b"world").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn reset_removes_previous_contents_and_tolerates_missing_dirs() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    let handle = storage.get_or_create_directory("site").unwrap();
    storage.write_file(&handle, "stale/old.txt", b"x").unwrap();

    storage.reset_directory("site").unwrap();
    assert!(!temp.path().join("site").exists());

    storage.reset_directory("never-created").unwrap();
}

#[test]
fn list_files_reports_sorted_children_with_kinds() {
    let temp = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp.path());
    let handle = storage.get_or_create_directory("site").unwrap();
    storage.write_file(&handle, "b.txt", b"b").unwrap();
    storage.write_file(&handle, "a/inner.txt", b"a").unwrap();

    assert_eq!(
        storage.list_files("site").unwrap(),
        vec![
            StorageEntry {
                name: "a".to_string(),
                kind: EntryKind::Directory,
            },
            StorageEntry {
                name: "b.txt".to_string(),
                kind: EntryKind::File,
            },
        ]
    );
    assert_eq!(
        storage.list_files("").unwrap(),
        vec![StorageEntry {
            name: "site".to_string(),
            kind: EntryKind::Directory,
        }]
    );
}

#[test]
fn escaping_paths_are_refused() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    let storage = LocalStorage::new(&root);
    let handle = storage.get_or_create_directory("site").unwrap();

    let err = storage
        .write_file(&handle, "../../outside.txt", b"x")
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidPath(_)));
    assert!(!temp.path().join("outside.txt").exists());

    assert!(matches!(
        storage.reset_directory(".."),
        Err(StorageError::InvalidPath(_))
    ));
    assert!(matches!(
        storage.reset_directory(""),
        Err(StorageError::InvalidPath(_))
    ));
}

#[test]
fn directory_id_naming_a_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("taken"), "x").unwrap();
    let storage = LocalStorage::new(temp.path());

    let err = storage.get_or_create_directory("taken").unwrap_err();
    assert!(matches!(err, StorageError::OutputDir(_)));
}
