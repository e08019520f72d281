use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage path {0:?}")]
    InvalidPath(String),
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Writable handle to a logical directory returned by
/// [`StorageAdapter::get_or_create_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    id: String,
    path: PathBuf,
}

impl DirectoryHandle {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Where mirrored files land. Directory ids and file paths are
/// `/`-separated and relative; `..` and absolute components are refused.
pub trait StorageAdapter: Send + Sync {
    /// Destructively removes the directory `id` and everything under it.
    fn reset_directory(&self, id: &str) -> Result<(), StorageError>;

    fn get_or_create_directory(&self, id: &str) -> Result<DirectoryHandle, StorageError>;

    /// Writes `bytes` at `relative_path` under `dir`, creating intermediate
    /// directories. Returns the written file's path.
    fn write_file(
        &self,
        dir: &DirectoryHandle,
        relative_path: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError>;

    /// Immediate children of `path`, sorted by name. An empty path lists the
    /// storage root.
    fn list_files(&self, path: &str) -> Result<Vec<StorageEntry>, StorageError>;
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), StorageError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StorageError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StorageError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StorageError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Filesystem storage rooted at a single directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn directory_path(&self, id: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(checked_relative(id)?))
    }
}

impl StorageAdapter for LocalStorage {
    fn reset_directory(&self, id: &str) -> Result<(), StorageError> {
        let path = self.directory_path(id)?;
        match fs::remove_dir_all(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn get_or_create_directory(&self, id: &str) -> Result<DirectoryHandle, StorageError> {
        let path = self.directory_path(id)?;
        ensure_output_dir(&path)?;
        Ok(DirectoryHandle {
            id: id.to_string(),
            path,
        })
    }

    fn write_file(
        &self,
        dir: &DirectoryHandle,
        relative_path: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let target = dir.path.join(checked_relative(relative_path)?);
        let parent = target
            .parent()
            .ok_or_else(|| StorageError::InvalidPath(relative_path.to_string()))?;
        ensure_output_dir(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.is_dir() {
            return Err(StorageError::InvalidPath(relative_path.to_string()));
        }
        tmp.persist(&target).map_err(|e| StorageError::Io(e.error))?;
        Ok(target)
    }

    fn list_files(&self, path: &str) -> Result<Vec<StorageEntry>, StorageError> {
        let dir = if path.trim_matches('/').is_empty() {
            self.root.clone()
        } else {
            self.directory_path(path)?
        };
        let mut entries = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_type = entry.file_type().ok()?;
                let kind = if file_type.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };
                Some(StorageEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind,
                })
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Converts a `/`-separated relative path into a `PathBuf`, refusing
/// anything that could land outside the directory it is joined to.
fn checked_relative(raw: &str) -> Result<PathBuf, StorageError> {
    let invalid = || StorageError::InvalidPath(raw.to_string());
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut path = PathBuf::new();
    for segment in trimmed.split('/') {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains(['\\', '\0'])
        {
            return Err(invalid());
        }
        path.push(segment);
    }
    // Catches platform prefixes such as `C:` that survive the checks above.
    if !path.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(invalid());
    }
    Ok(path)
}
